//! Main Language Server Protocol server implementation for sassfmt
//!
//! Exposes sass-convert-backed formatting as LSP document and range
//! formatting. The server keeps a full-text store of open documents and a
//! configuration snapshot that is replaced wholesale on configuration
//! changes, so an in-flight format request never sees a half-applied
//! configuration.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result as JsonRpcResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::LoadedConfig;
use crate::convert::{CONVERSION_FAILED_MESSAGE, FormatService};
use crate::dialect::Dialect;
use crate::lsp::types::{SassfmtLspConfig, byte_span, full_document_range};

/// One open document: full text plus the language id the editor declared.
#[derive(Debug, Clone)]
struct OpenDocument {
    text: String,
    language_id: String,
}

/// LSP server for sassfmt
pub struct SassfmtLanguageServer {
    client: Client,
    /// LSP-level options from the editor
    config: Arc<RwLock<SassfmtLspConfig>>,
    /// Configuration snapshot with the resolved converter command
    service: Arc<RwLock<FormatService>>,
    /// Document store for open files
    documents: Arc<RwLock<HashMap<Url, OpenDocument>>>,
}

impl SassfmtLanguageServer {
    pub fn new(client: Client, config_path: Option<String>) -> Self {
        let lsp_config = SassfmtLspConfig {
            config_path,
            ..Default::default()
        };
        Self {
            client,
            config: Arc::new(RwLock::new(lsp_config)),
            service: Arc::new(RwLock::new(FormatService::new(Default::default()))),
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Load configuration and swap in a fresh snapshot.
    async fn reload_service(&self) {
        let config_path = self.config.read().await.config_path.clone();
        let loaded = match LoadedConfig::load(config_path.as_deref().map(Path::new)) {
            Ok(loaded) => {
                if let Some(source) = &loaded.source {
                    log::info!("loaded configuration from {}", source.display());
                }
                loaded
            }
            Err(e) => {
                log::warn!("failed to load configuration: {e}");
                self.client
                    .log_message(MessageType::WARNING, format!("sassfmt: failed to load configuration: {e}"))
                    .await;
                LoadedConfig::default()
            }
        };
        *self.service.write().await = FormatService::new(loaded.config);
    }

    /// Advisory converter probe: log the version, or tell the user which
    /// setting to fix. Never blocks later format requests.
    async fn check_converter(&self) {
        let service = self.service.read().await.clone();
        let program = service.command().display().to_string();
        let unreachable = service.command().unreachable_message();

        match tokio::task::spawn_blocking(move || service.verify()).await {
            Ok(Ok(version)) => {
                log::info!("{program}: {version}");
                self.client.log_message(MessageType::INFO, format!("sassfmt: using {program} ({version})")).await;
            }
            Ok(Err(e)) => {
                log::warn!("{program}: {e}");
                self.client.show_message(MessageType::WARNING, unreachable).await;
                self.client.log_message(MessageType::WARNING, e.diagnostic()).await;
            }
            Err(e) => log::error!("converter check task failed: {e}"),
        }
    }

    /// Run the pipeline over `text`, reporting failures to the editor.
    ///
    /// The conversion is blocking subprocess I/O, so it runs on the
    /// blocking pool rather than on the protocol loop.
    async fn run_format(&self, text: String, dialect: Dialect) -> Option<String> {
        let service = self.service.read().await.clone();

        match tokio::task::spawn_blocking(move || service.format(&text, dialect)).await {
            Ok(Ok(formatted)) => Some(formatted),
            Ok(Err(e)) => {
                log::error!("format failed: {e}");
                if self.config.read().await.show_error_messages {
                    self.client.show_message(MessageType::ERROR, CONVERSION_FAILED_MESSAGE).await;
                }
                self.client.log_message(MessageType::ERROR, e.diagnostic()).await;
                None
            }
            Err(e) => {
                log::error!("format task failed: {e}");
                None
            }
        }
    }

    /// Dialect for a document: declared language id first, then the file
    /// extension, then the SCSS default.
    fn dialect_for(doc: &OpenDocument, uri: &Url) -> Dialect {
        if let Some(dialect) = Dialect::from_language_id(&doc.language_id) {
            return dialect;
        }
        uri.to_file_path()
            .ok()
            .and_then(|path| Dialect::from_path(&path))
            .or_else(|| Dialect::from_path(Path::new(uri.path())))
            .unwrap_or(Dialect::Scss)
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for SassfmtLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> JsonRpcResult<InitializeResult> {
        log::info!("initializing sassfmt language server");

        if let Some(options) = params.initialization_options {
            match serde_json::from_value::<SassfmtLspConfig>(options) {
                Ok(mut config) => {
                    // A config path handed to `sassfmt server --config`
                    // survives unless the editor sends its own.
                    if config.config_path.is_none() {
                        config.config_path = self.config.read().await.config_path.clone();
                    }
                    *self.config.write().await = config;
                }
                Err(e) => log::warn!("invalid initialization options: {e}"),
            }
        }

        self.reload_service().await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
                document_formatting_provider: Some(OneOf::Left(true)),
                document_range_formatting_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "sassfmt".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        log::info!("sassfmt language server initialized");
        self.client
            .log_message(MessageType::INFO, "sassfmt language server started")
            .await;
        self.check_converter().await;
    }

    async fn shutdown(&self) -> JsonRpcResult<()> {
        log::info!("shutting down sassfmt language server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = OpenDocument {
            text: params.text_document.text,
            language_id: params.text_document.language_id,
        };
        self.documents.write().await.insert(params.text_document.uri, doc);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // Full sync: the change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().next() {
            self.documents
                .write()
                .await
                .entry(params.text_document.uri)
                .and_modify(|doc| doc.text = change.text.clone())
                .or_insert_with(|| OpenDocument {
                    text: change.text,
                    language_id: String::new(),
                });
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.write().await.remove(&params.text_document.uri);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if let Some(section) = params.settings.get("sassfmt") {
            match serde_json::from_value::<SassfmtLspConfig>(section.clone()) {
                Ok(config) => *self.config.write().await = config,
                Err(e) => log::warn!("invalid sassfmt settings: {e}"),
            }
        }

        log::info!("configuration changed, reloading");
        self.reload_service().await;
        self.check_converter().await;
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> JsonRpcResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let Some(doc) = self.documents.read().await.get(&uri).cloned() else {
            return Ok(None);
        };

        // Indentation and style come from sassfmt's own configuration, not
        // from the editor's FormattingOptions.
        let dialect = Self::dialect_for(&doc, &uri);
        let range = full_document_range(&doc.text);

        match self.run_format(doc.text, dialect).await {
            Some(new_text) => Ok(Some(vec![TextEdit { range, new_text }])),
            None => Ok(None),
        }
    }

    async fn range_formatting(&self, params: DocumentRangeFormattingParams) -> JsonRpcResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let Some(doc) = self.documents.read().await.get(&uri).cloned() else {
            return Ok(None);
        };

        let dialect = Self::dialect_for(&doc, &uri);

        // Only the requested span goes through the converter; the rest of
        // the document is never touched.
        let (start, end) = byte_span(&doc.text, params.range);
        let slice = doc.text[start..end].to_string();

        match self.run_format(slice, dialect).await {
            Some(new_text) => Ok(Some(vec![TextEdit {
                range: params.range,
                new_text,
            }])),
            None => Ok(None),
        }
    }
}
