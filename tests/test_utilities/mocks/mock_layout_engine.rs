use async_trait::async_trait;
use depgraph::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock LayoutEngine that "renders" by prefixing the description with the
/// format name
///
/// Descriptions containing the `fail_on` marker fail like a Graphviz error.
#[derive(Default, Clone)]
pub struct MockLayoutEngine {
    fail_on: Option<String>,
    pub descriptions: Arc<Mutex<Vec<String>>>,
}

impl MockLayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            ..Self::default()
        }
    }

    pub fn render_count(&self) -> usize {
        self.descriptions.lock().unwrap().len()
    }
}

#[async_trait]
impl LayoutEngine for MockLayoutEngine {
    async fn render(&self, description: &str, format: ImageFormat) -> Result<Vec<u8>> {
        self.descriptions
            .lock()
            .unwrap()
            .push(description.to_string());

        if let Some(marker) = &self.fail_on {
            if description.contains(marker.as_str()) {
                return Err(DepGraphError::LayoutEngineError {
                    tool: "dot".to_string(),
                    exit_code: 1,
                    stderr: "Error: syntax error in line 1".to_string(),
                }
                .into());
            }
        }

        Ok(format!("{}\n{}", format, description).into_bytes())
    }
}
