use serde::Serialize;

use crate::output::locale;
use crate::roster::{self, MemberRecord};

pub const PAGE_SIZE: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub filter_text: String,
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter_text: String::new(),
            current_page: 1,
        }
    }
}

impl ViewState {
    pub fn on_search_input(&mut self, text: &str) {
        self.filter_text = text.to_string();
        self.current_page = 1;
    }

    /// Bounded above by the clamp in [`project`].
    pub fn on_next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Never drops below the first page, even when the caller ignores `prev_enabled`.
    pub fn on_prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn on_enter_members_view(&mut self) {
        *self = Self::default();
    }

    pub fn search_active(&self) -> bool {
        !self.filter_text.is_empty()
    }
}

/// Everything a renderer needs to paint the members screen.
///
/// `state` is the view state after page clamping; the owner stores it back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub show_leader_section: bool,
    pub leader_cards: Vec<MemberRecord>,
    pub member_cards: Vec<MemberRecord>,
    pub show_pagination: bool,
    pub page_label: Option<String>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub total_pages: usize,
    pub state: ViewState,
}

pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

pub fn project(
    all_members: &[MemberRecord],
    leaders: &[MemberRecord],
    state: &ViewState,
) -> RenderPlan {
    let mut state = state.clone();
    if state.current_page == 0 {
        state.current_page = 1;
    }

    if state.search_active() {
        let member_cards = roster::filter_members(all_members, &state.filter_text);
        return RenderPlan {
            show_leader_section: false,
            leader_cards: Vec::new(),
            member_cards,
            show_pagination: false,
            page_label: None,
            prev_enabled: false,
            next_enabled: false,
            total_pages: 0,
            state,
        };
    }

    let filtered = roster::default_members(all_members);
    let total = total_pages(filtered.len());
    if total > 0 && state.current_page > total {
        state.current_page = total;
    }
    let page = state.current_page;

    let on_first_page = page == 1;
    let leader_cards = if on_first_page {
        leaders.to_vec()
    } else {
        Vec::new()
    };

    let start = (page - 1).saturating_mul(PAGE_SIZE).min(filtered.len());
    let end = start.saturating_add(PAGE_SIZE).min(filtered.len());
    let member_cards = filtered[start..end].to_vec();

    let show_pagination = total > 1;
    RenderPlan {
        show_leader_section: on_first_page && !leaders.is_empty(),
        leader_cards,
        member_cards,
        show_pagination,
        page_label: show_pagination.then(|| locale::page_label(page, total)),
        prev_enabled: show_pagination && page > 1,
        next_enabled: show_pagination && page < total,
        total_pages: total,
        state,
    }
}
