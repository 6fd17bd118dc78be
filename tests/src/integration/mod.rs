//! Cross-crate choreography over the shared event bus.

#[cfg(test)]
mod harness;

#[cfg(test)]
mod chain_flows;

#[cfg(test)]
mod telemetry;
