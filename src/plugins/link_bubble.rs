//! Link bubble plugin state.
//!
//! Tracks which link mark the bubble menu is currently shown for. State only
//! changes through transactions carrying [`LinkBubbleMeta`]; the command
//! functions follow the editor's command convention of returning whether
//! they apply and dispatching only when a dispatcher is passed.

use serde::{Deserialize, Serialize};

/// Name of the mark type the bubble reacts to.
pub const LINK_MARK: &str = "link";

/// A mark at a document position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Mark {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            href: None,
        }
    }

    pub fn link(href: impl Into<String>) -> Self {
        Self {
            type_name: LINK_MARK.to_string(),
            href: Some(href.into()),
        }
    }

    pub fn is_link(&self) -> bool {
        self.type_name == LINK_MARK
    }
}

/// The link the bubble is shown for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveLink {
    pub mark: Mark,
}

/// Transaction metadata understood by the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkBubbleMeta {
    pub active: Option<ActiveLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkBubbleState {
    pub active: Option<ActiveLink>,
}

impl LinkBubbleState {
    /// State after a transaction. Transactions without plugin meta keep the
    /// current state.
    pub fn apply(&self, meta: Option<&LinkBubbleMeta>) -> Self {
        match meta {
            Some(meta) => Self {
                active: meta.active.clone(),
            },
            None => self.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

/// Show the bubble for the link mark among `marks`.
///
/// Returns `false` when there is no link mark.
pub fn set_active_link(marks: &[Mark], dispatch: Option<&mut dyn FnMut(LinkBubbleMeta)>) -> bool {
    let Some(mark) = marks.iter().find(|m| m.is_link()) else {
        return false;
    };
    if let Some(dispatch) = dispatch {
        dispatch(LinkBubbleMeta {
            active: Some(ActiveLink { mark: mark.clone() }),
        });
    }
    true
}

/// Hide the bubble.
///
/// Returns `false` when the bubble is not shown.
pub fn hide_link_bubble(
    state: &LinkBubbleState,
    dispatch: Option<&mut dyn FnMut(LinkBubbleMeta)>,
) -> bool {
    if !state.is_active() {
        return false;
    }
    if let Some(dispatch) = dispatch {
        dispatch(LinkBubbleMeta { active: None });
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs commands against a state the way the editor view would.
    struct Flow {
        state: LinkBubbleState,
    }

    impl Flow {
        fn new() -> Self {
            Self {
                state: LinkBubbleState::default(),
            }
        }

        fn dispatcher(&mut self) -> impl FnMut(LinkBubbleMeta) + '_ {
            move |meta| self.state = self.state.apply(Some(&meta))
        }
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(LinkBubbleState::default().active, None);
    }

    #[test]
    fn test_apply_meta() {
        let state = LinkBubbleState::default();
        let meta = LinkBubbleMeta {
            active: Some(ActiveLink {
                mark: Mark::link("https://example.com"),
            }),
        };
        let after = state.apply(Some(&meta));
        assert_eq!(after.active, meta.active);
        assert_eq!(after.apply(None), after);
    }

    #[test]
    fn test_set_active_link_requires_link_mark() {
        assert!(!set_active_link(&[], None));
        assert!(!set_active_link(&[Mark::new("other")], None));
        assert!(set_active_link(&[Mark::new("link")], None));
    }

    #[test]
    fn test_set_active_link_extracts_mark() {
        let mut flow = Flow::new();
        let marks = [Mark::new("bold"), Mark::link("https://example.com")];
        {
            let mut dispatch = flow.dispatcher();
            assert!(set_active_link(&marks, Some(&mut dispatch)));
        }
        assert_eq!(
            flow.state.active.map(|a| a.mark),
            Some(Mark::link("https://example.com"))
        );
    }

    #[test]
    fn test_hide_requires_active_bubble() {
        assert!(!hide_link_bubble(&LinkBubbleState::default(), None));
    }

    #[test]
    fn test_hide_clears_active() {
        let mut flow = Flow::new();
        {
            let mut dispatch = flow.dispatcher();
            set_active_link(&[Mark::link("https://example.com")], Some(&mut dispatch));
        }
        let current = flow.state.clone();
        {
            let mut dispatch = flow.dispatcher();
            assert!(hide_link_bubble(&current, Some(&mut dispatch)));
        }
        assert_eq!(flow.state.active, None);
    }
}
