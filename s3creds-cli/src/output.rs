use anyhow::Result;
use clap::ValueEnum;
use s3creds::env::{ACCESS_KEY_VAR, SECRET_KEY_VAR};
use s3creds::Credentials;

const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Shell `export` lines
    Export,
    Json,
}

impl Format {
    pub fn render(self, creds: &Credentials) -> Result<String> {
        match self {
            Format::Export => Ok(export_lines(creds)),
            Format::Json => Ok(serde_json::to_string_pretty(creds)?),
        }
    }
}

fn export_lines(creds: &Credentials) -> String {
    let mut lines = vec![
        format!("export {}={}", ACCESS_KEY_VAR, creds.access_key),
        format!("export {}={}", SECRET_KEY_VAR, creds.secret_key),
    ];
    if creds.is_temporary() {
        lines.push(format!("export {}={}", SESSION_TOKEN_VAR, creds.session_token));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_without_token() {
        let out = Format::Export
            .render(&Credentials::new("AKIA1", "s3cr3t"))
            .unwrap();

        assert_eq!(
            out,
            "export AWS_ACCESS_KEY_ID=AKIA1\nexport AWS_SECRET_ACCESS_KEY=s3cr3t"
        );
    }

    #[test]
    fn test_export_with_token() {
        let out = Format::Export
            .render(&Credentials::with_session_token("A", "B", "T"))
            .unwrap();

        assert!(out.ends_with("\nexport AWS_SESSION_TOKEN=T"));
    }

    #[test]
    fn test_json_output() {
        let out = Format::Json
            .render(&Credentials::with_session_token("A", "B", "T"))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["access_key"], "A");
        assert_eq!(value["secret_key"], "B");
        assert_eq!(value["session_token"], "T");
    }
}
