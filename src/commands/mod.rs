//! One handler per salesdeck subcommand. Handlers load what they need, do the work and return an
//! `Out` without printing anything themselves.

mod init;
mod render;
mod slide;
mod summary;

use serde::Serialize;
use std::fmt::{Debug, Display};
use tracing::{debug, info};

pub use init::init;
pub use render::{render, RenderReport};
pub use slide::{slide, Rendered};
pub use summary::{summary, SummaryReport};

/// What a command hands back to `main`: a one-line outcome message plus, for commands that
/// produce something, the produced value. `main` decides where each part is printed.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Logged at `info` level.
    message: String,

    /// The command's product, if any.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// An outcome that carries `structure`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// An outcome that is only a message.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Logs the message, and the structure as JSON at `debug` level. Nothing goes to stdout.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }

    /// Logs the message and prints the structure to stdout as pretty JSON.
    pub fn print_json(&self) -> crate::Result<()> {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            println!("{}", serde_json::to_string_pretty(structure)?);
        }
        Ok(())
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug + Display,
{
    /// Logs the message and prints the structure to stdout through its `Display` impl.
    pub fn print_display(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            println!("{structure}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_from_message() {
        let out: Out<()> = "done".into();
        assert_eq!("done", out.message());
        assert!(out.structure().is_none());
    }

    #[test]
    fn test_out_serialization() {
        let out = Out::new("counted", vec![1, 2]);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!("counted", json["message"]);
        assert_eq!(2, json["structure"][1]);
    }
}
