use std::path::Path;

use clap::Subcommand;
use studyhall_core::api::HealthStatus;
use studyhall_core::Config;

#[derive(Subcommand)]
pub enum DocumentsAction {
    /// List indexed documents
    List,
    /// Remove a document from the index
    Delete {
        /// Document ID
        id: String,
    },
}

pub async fn health(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client(config)?;
    match client.health().await {
        HealthStatus::Ok { data } => {
            println!("connected to {}", client.base_url());
            tracing::debug!(%data, "health payload");
            Ok(())
        }
        HealthStatus::Error { message } => Err(format!("backend offline: {message}").into()),
    }
}

pub async fn upload(config: &Config, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client(config)?;
    let doc = client.upload_document(file).await?;
    println!(
        "uploaded {} as {} ({} chunks, {})",
        doc.filename, doc.id, doc.chunks_count, doc.status
    );
    Ok(())
}

pub async fn run(action: DocumentsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client(config)?;
    let result = match action {
        DocumentsAction::List => client.list_documents().await?,
        DocumentsAction::Delete { id } => client.delete_document(&id).await?,
    };
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
