//! # Application Bootstrap
//!
//! A plain factory in place of declarative configuration: called once at
//! process (or test) start with the store endpoint, it opens the shared
//! connection and returns the wired context by value. No ambient registry,
//! nothing global.

use std::sync::Arc;

use tracing::info;

use tkv_client::{ClientConfig, RawClient};

use crate::codec::{DecimalIntCodec, Utf8KeyCodec};
use crate::template::{KvTemplate, TemplateResult};

/// Everything the application holds after startup.
pub struct AppContext {
    /// Counter template: text keys, decimal-text integer values.
    ///
    /// Decimal text is deliberate: command-line writers store counters as
    /// plain decimal strings, and the template must read those same keys.
    pub counters: KvTemplate<Utf8KeyCodec, DecimalIntCodec>,
}

impl AppContext {
    /// Opens the store connection per `config` and wires the templates.
    pub fn bootstrap(config: ClientConfig) -> TemplateResult<AppContext> {
        let addr = config.addr.clone();
        let client = Arc::new(RawClient::with_config(config)?);
        info!(%addr, "store connection established");

        Ok(AppContext {
            counters: KvTemplate::new(client, Utf8KeyCodec, DecimalIntCodec),
        })
    }
}
