/// Source of the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    /// Browser request routed through the web layer
    Web,

    /// Request originated from CLI command
    CLI,

    /// Request originated from system (automated operations)
    System,
}
