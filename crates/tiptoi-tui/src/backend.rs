use tiptoi_core::GmeClient;

use crate::tui_event::{BackendCommand, BackendEvent};

/// Run one command against the vendor site and fold its result into a single event.
pub async fn execute(client: GmeClient, cmd: BackendCommand) -> BackendEvent {
    let kind = cmd.kind();
    let result = match cmd {
        BackendCommand::FetchCatalog => client
            .fetch_catalog()
            .await
            .map(BackendEvent::CatalogLoaded),
        BackendCommand::FetchAudioLinks { detail_url } => client
            .fetch_audio_links(&detail_url)
            .await
            .map(BackendEvent::AudioLinksLoaded),
        BackendCommand::Download {
            file_url,
            destination,
        } => client
            .download_file(&file_url, &destination)
            .await
            .map(|path| BackendEvent::DownloadComplete { path }),
    };

    result.unwrap_or_else(|e| {
        tracing::warn!(?kind, error = %e, "background operation failed");
        BackendEvent::Failed {
            kind,
            error: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use tiptoi_core::{CatalogEntry, ClientConfig};

    use crate::tui_event::OperationKind;

    fn client_for(server: &mockito::Server) -> GmeClient {
        GmeClient::new(ClientConfig {
            catalog_url: format!("{}/catalog", server.url()),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn catalog_success_becomes_loaded_event() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/catalog")
            .with_status(200)
            .with_body(r#"<div class="mt-show-more-listing"><a href="/a" title="Game A">x</a></div>"#)
            .create_async()
            .await;

        let event = execute(client_for(&server), BackendCommand::FetchCatalog).await;

        match event {
            BackendEvent::CatalogLoaded(entries) => assert_eq!(
                entries,
                vec![CatalogEntry::new("Game A", format!("{}/a", server.url()))]
            ),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failures_carry_the_command_kind() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/gone")
            .with_status(500)
            .create_async()
            .await;
        let client = client_for(&server);

        let event = execute(
            client.clone(),
            BackendCommand::FetchAudioLinks {
                detail_url: format!("{}/products/gone", server.url()),
            },
        )
        .await;
        match event {
            BackendEvent::Failed { kind, error } => {
                assert_eq!(kind, OperationKind::AudioLinks);
                assert!(error.ends_with(" - 500"), "{error}");
            }
            other => panic!("unexpected event: {other:?}"),
        }

        // A URL without a file name fails before any request is made.
        let event = execute(
            client,
            BackendCommand::Download {
                file_url: format!("{}/files/", server.url()),
                destination: PathBuf::from("/nonexistent"),
            },
        )
        .await;
        assert!(matches!(
            event,
            BackendEvent::Failed {
                kind: OperationKind::Download,
                ..
            }
        ));
    }
}
