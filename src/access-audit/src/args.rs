// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::bail;
use clap::Parser;

/// Configuration options for the audit.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = super::DESCRIPTION)]
pub struct Args {
    /// The project containing the datasets to audit.
    #[arg(long, alias = "project_id", env = "GOOGLE_CLOUD_PROJECT")]
    pub project_id: String,

    /// Log every skipped access entry.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Validates the arguments after parsing.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.project_id.trim().is_empty() {
            bail!("Please add --project-id <PROJECT_ID> or set GOOGLE_CLOUD_PROJECT")
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use test_case::test_case;

    #[test_case(&["program", "--project-id=my-project"])]
    #[test_case(&["program", "--project-id", "my-project"])]
    #[test_case(&["program", "--project_id=my-project"])]
    fn validate_success(input: &[&str]) -> anyhow::Result<()> {
        let args = Args::try_parse_from(input)?;
        assert_eq!(args.project_id, "my-project");
        assert!(!args.verbose, "{args:?}");
        let got = args.validate();
        assert!(got.is_ok(), "{got:?} {args:?}");
        Ok(())
    }

    #[test_case(&["program", "--project-id=  "])]
    fn validate(input: &[&str]) -> anyhow::Result<()> {
        let args = Args::try_parse_from(input)?;
        let got = args.validate();
        assert!(got.is_err(), "{got:?} {args:?}");
        Ok(())
    }

    #[test]
    fn verbose() -> anyhow::Result<()> {
        let args = Args::try_parse_from(["program", "--project-id=p", "-v"])?;
        assert!(args.verbose, "{args:?}");
        Ok(())
    }

    #[test]
    fn project_id_is_required() {
        let command = Args::command();
        let arg = command.get_arguments().find(|a| a.get_id() == "project_id");
        assert!(arg.is_some_and(|a| a.is_required_set()), "{arg:?}");
    }

    #[test]
    fn missing_project_id() {
        // The environment fallback cannot be unset safely in a test, so the
        // command is rebuilt without it.
        let command = Args::command().mut_arg("project_id", |a| a.env(None::<&str>));
        let err = command.try_get_matches_from(["program"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument,
            "{err}"
        );
    }

    #[test]
    fn project_id_from_environment() {
        let command = Args::command();
        let env = command
            .get_arguments()
            .find(|a| a.get_id() == "project_id")
            .and_then(|a| a.get_env());
        assert_eq!(env, Some(std::ffi::OsStr::new("GOOGLE_CLOUD_PROJECT")));
    }
}
