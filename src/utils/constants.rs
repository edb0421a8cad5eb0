//! Constants for well-known URIs used throughout the A2A runtime.

/// The well-known path the agent card is served under.
pub const AGENT_CARD_WELL_KNOWN_PATH: &str = "/.well-known/agent.json";

/// The default JSON-RPC endpoint path, relative to an agent's base URL.
pub const DEFAULT_RPC_URL: &str = "/a2a";
