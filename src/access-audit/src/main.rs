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

//! Prints which principals can access the datasets of a BigQuery project.

mod args;

use access_audit::bigquery::scan_project;
use args::Args;
use clap::Parser;
use google_cloud_bigquery_v2::client::DatasetService;

const DESCRIPTION: &str = concat!(
    "This program lists the access entries of every dataset in a BigQuery",
    " project and prints, for each user, group, or special group, the datasets",
    " it can access with an rwx-style permission."
);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.validate()?;
    enable_tracing(&args);
    tracing::info!("Configuration: {args:?}");

    let client = DatasetService::builder().build().await?;
    let audit = scan_project(&client, &args.project_id).await?;
    print!("{}", audit.register());

    Ok(())
}

fn enable_tracing(args: &Args) {
    use tracing_subscriber::fmt::format::FmtSpan;

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting global subscriber succeeds");
}
