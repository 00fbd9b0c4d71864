#![forbid(unsafe_code)]

//! Label behavior: effective `aria-label`/`aria-labelledby` composition.

use aria_core::signal::Signal;

/// Computes the effective labelling for a pattern's container element.
///
/// Hosts bind the result of [`labelled_by`](LabelControl::labelled_by)
/// onto `aria-labelledby` and [`label`](LabelControl::label) onto
/// `aria-label`. An explicit `labelled_by` input wins over the
/// pattern-provided default composition (e.g. a combobox defaulting to
/// its input element's label).
#[derive(Debug, Clone, Default)]
pub struct LabelControl {
    /// Literal label text, if any.
    pub label: Signal<Option<String>>,
    /// Explicit labelling element ids supplied by the host.
    pub labelled_by: Signal<Vec<String>>,
    /// Fallback labelling ids contributed by the owning pattern.
    pub default_labelled_by: Signal<Vec<String>>,
}

impl LabelControl {
    /// Create an unlabelled control.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The literal label, passed through.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.label.get()
    }

    /// The effective `aria-labelledby` id list: the explicit ids when any
    /// were supplied, the default composition otherwise.
    #[must_use]
    pub fn labelled_by(&self) -> Vec<String> {
        let explicit = self.labelled_by.get();
        if explicit.is_empty() {
            self.default_labelled_by.get()
        } else {
            explicit
        }
    }

    /// Whether any labelling is available at all.
    #[must_use]
    pub fn is_labelled(&self) -> bool {
        self.label.with(Option::is_some) || !self.labelled_by().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlabelled_by_default() {
        let ctl = LabelControl::new();
        assert_eq!(ctl.label(), None);
        assert!(ctl.labelled_by().is_empty());
        assert!(!ctl.is_labelled());
    }

    #[test]
    fn explicit_ids_win_over_default() {
        let ctl = LabelControl::new();
        ctl.default_labelled_by.set(vec!["fallback".into()]);
        assert_eq!(ctl.labelled_by(), vec!["fallback".to_string()]);

        ctl.labelled_by.set(vec!["a".into(), "b".into()]);
        assert_eq!(ctl.labelled_by(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn label_passes_through() {
        let ctl = LabelControl::new();
        ctl.label.set(Some("Fruits".into()));
        assert_eq!(ctl.label(), Some("Fruits".to_string()));
        assert!(ctl.is_labelled());
    }
}
