//! A2A client — call remote A2A agents.
//!
//! - [`A2AClient`] — high-level client with typed methods for every A2A
//!   JSON-RPC operation (send/get/cancel tasks, push notification config,
//!   subscribe to streams)
//! - [`CardResolver`] — discover agent cards via the well-known URL convention
//! - [`Transport`] / [`JsonRpcTransport`] — pluggable transport layer
//! - [`UpdateStream`] / [`ErrorStream`] — parsed SSE event channels for streaming calls
//! - [`CancellationToken`] — fires to abort an in-flight streaming call
//!
//! # Quick Start
//!
//! ```no_run
//! use a2a_runtime::client::{A2AClient, CancellationToken, StreamUpdate};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect to an agent (resolves agent card automatically):
//! let client = A2AClient::from_url("http://localhost:7420").await?;
//!
//! // Send a text message and block for the result:
//! let task = client.send_text(None, "Hello, agent!").await?;
//! println!("Task {} — status: {}", task.id, task.status.state);
//!
//! // Or stream updates as the handler runs:
//! let cancel = CancellationToken::new();
//! let (mut updates, mut errors) = client.send_text_stream(None, "Write a haiku", cancel).await?;
//! while let Some(update) = updates.next().await {
//!     match update {
//!         StreamUpdate::Status(status) => println!("status: {}", status.state),
//!         StreamUpdate::Artifact(artifact) => println!("artifact: {}", artifact.id),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod a2a_client;
pub mod cancellation;
mod card_resolver;
mod sse;
mod transport;

pub use a2a_client::{create_text_message, A2AClient};
pub use cancellation::CancellationToken;
pub use card_resolver::CardResolver;
pub use sse::{ErrorStream, StreamUpdate, UpdateStream};
pub use transport::{JsonRpcTransport, Transport, TransportConfig};
