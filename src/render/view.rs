use serde::Serialize;

use crate::{render::group::RenderedGroup, schema::schema_model::Group};

/// One entry of the group sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub title: String,
    pub active: bool,
}

/// What the primary button does on the active group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    Next,
    Submit,
    /// Form already submitted; nothing left to do.
    Done,
}

impl NextAction {
    pub fn label(&self) -> &'static str {
        match self {
            NextAction::Next => "Next",
            NextAction::Submit => "Submit",
            NextAction::Done => "Submitted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    /// 1-based position of the active group.
    pub position: usize,
    pub total: usize,
    pub next_action: NextAction,
}

/// Whole-form description handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sidebar: Vec<NavItem>,
    pub active: RenderedGroup,
    pub navigation: NavigationState,
    /// Non-blocking notice, e.g. a snapshot that failed to save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub fn render_sidebar(groups: &[Group], active_index: usize) -> Vec<NavItem> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| NavItem {
            title: group.title.clone(),
            active: index == active_index,
        })
        .collect()
}

pub fn navigation_state(active_index: usize, total: usize, submitted: bool) -> NavigationState {
    let next_action = if submitted {
        NextAction::Done
    } else if active_index + 1 >= total {
        NextAction::Submit
    } else {
        NextAction::Next
    };

    NavigationState {
        position: active_index + 1,
        total,
        next_action,
    }
}
