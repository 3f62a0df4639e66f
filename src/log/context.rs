use super::{Emit, Level};
use std::fmt;
use std::sync::Arc;

/// Logger decorator that prefixes `[label] ` onto every message
///
/// Holds only a reference to its parent; the sink and debug flag always come
/// from the base logger at the end of the chain.
#[derive(Clone)]
pub struct ContextLogger {
    parent: Arc<dyn Emit>,
    label: Arc<str>,
}

impl ContextLogger {
    pub(crate) fn new(parent: Arc<dyn Emit>, label: impl Into<String>) -> Self {
        Self {
            parent,
            label: Arc::from(label.into()),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Nest another label inside this one
    #[must_use]
    pub fn with(&self, label: impl Into<String>) -> Self {
        Self::new(Arc::new(self.clone()), label)
    }
}

impl Emit for ContextLogger {
    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        self.parent
            .emit(level, format_args!("[{}] {}", self.label, args));
    }

    fn debug_enabled(&self) -> bool {
        self.parent.debug_enabled()
    }
}

impl fmt::Debug for ContextLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextLogger")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::log::tests::Capture;
    use crate::log::{Emit, Logger};

    #[test]
    fn test_prefix_single_label() {
        let capture = Capture::default();
        let logger = Logger::with_writer(false, capture.clone());
        let audio = logger.with("audio");

        audio.warn(format_args!("underrun after {} ms", 20));
        assert!(capture
            .contents()
            .ends_with(" [WARN] [audio] underrun after 20 ms\n"));
        assert_eq!(audio.label(), "audio");
    }

    #[test]
    fn test_chained_labels_outermost_first() {
        let capture = Capture::default();
        let logger = Logger::with_writer(false, capture.clone());
        let inner = logger.with("X").with("Y");

        inner.info(format_args!("hi"));
        assert!(capture.contents().contains("[INFO] [X] [Y] hi"));
    }

    #[test]
    fn test_debug_gated_at_any_depth() {
        let capture = Capture::default();
        let logger = Logger::with_writer(false, capture.clone());
        let deep = logger.with("a").with("b").with("c").with("d");

        assert!(!deep.debug_enabled());
        deep.debug(format_args!("nothing"));
        deep.emit(crate::log::Level::Debug, format_args!("still nothing"));
        assert!(capture.contents().is_empty());

        let capture = Capture::default();
        let logger = Logger::with_writer(true, capture.clone());
        logger.with("a").with("b").debug(format_args!("visible"));
        assert!(capture.contents().ends_with(" [DEBUG] [a] [b] visible\n"));
    }

    #[test]
    fn test_wrapper_outlives_base_handle() {
        let capture = Capture::default();
        let wrapper = {
            let logger = Logger::with_writer(false, capture.clone());
            logger.with("late")
        };
        crate::log_error!(wrapper, "code {}", 7);
        assert!(capture.contents().ends_with(" [ERROR] [late] code 7\n"));
    }
}
