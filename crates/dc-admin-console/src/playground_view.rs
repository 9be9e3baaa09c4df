//! View state of the API playground.
//!
//! Holds the selected catalog entry, the three freeform JSON texts, and an
//! optionally selected file for the upload endpoint. Pure state; dispatch
//! happens through `dc_admin_client::invoke_endpoint`.

use std::path::PathBuf;

use dc_admin_api::{find_endpoint, path_placeholders, EndpointDescriptor, UPLOAD_KEY};
use dc_admin_client::{PlaygroundInput, UploadSource};

#[derive(Debug, Clone, Default)]
pub struct PlaygroundView {
    endpoint: Option<&'static EndpointDescriptor>,
    pub input: PlaygroundInput,
    pub file_path: Option<PathBuf>,
}

impl PlaygroundView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a catalog entry by key. Parameter texts and file selection
    /// are reset so stale input never leaks across endpoints.
    pub fn select(&mut self, key: &str) -> Result<&'static EndpointDescriptor, String> {
        match find_endpoint(key) {
            Some(endpoint) => {
                self.endpoint = Some(endpoint);
                self.input = PlaygroundInput::default();
                self.file_path = None;
                Ok(endpoint)
            }
            None => Err(format!("unknown endpoint: {key}")),
        }
    }

    pub fn endpoint(&self) -> Option<&'static EndpointDescriptor> {
        self.endpoint
    }

    pub fn is_upload(&self) -> bool {
        self.endpoint.map(|e| e.key == UPLOAD_KEY).unwrap_or(false)
    }

    /// Read the selected file into an upload source. `None` when no file
    /// has been picked; the invoker turns that into its own error.
    pub fn load_upload(&self) -> std::io::Result<Option<UploadSource>> {
        let Some(path) = &self.file_path else {
            return Ok(None);
        };
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        Ok(Some(UploadSource { file_name, bytes }))
    }

    /// Summary lines describing the selection, shown above the texts.
    pub fn summary_lines(&self) -> Vec<String> {
        let Some(endpoint) = self.endpoint else {
            return vec!["No endpoint selected. Use /select <key>.".to_string()];
        };
        let mut lines = vec![
            format!("{} {}", endpoint.method.as_str(), endpoint.path),
            format!(
                "{} | auth: {}",
                endpoint.description,
                if endpoint.auth { "bearer" } else { "none" }
            ),
        ];
        let placeholders = path_placeholders(endpoint.path);
        if !placeholders.is_empty() {
            lines.push(format!("path parameters: {}", placeholders.join(", ")));
        }
        if endpoint.key == UPLOAD_KEY {
            let file = self
                .file_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string());
            lines.push(format!("file: {file}"));
        }
        lines
    }
}
