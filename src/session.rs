use crate::loader::{FetchError, RosterLoader, RosterSource};
use crate::roster::{self, DecodeReport, MemberRecord};
use crate::view::{self, RenderPlan, ViewState};

pub const MEMBERS_FRAGMENT: &str = "members";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Members,
}

impl Screen {
    /// `#members` (or `members`) deep-links past the landing screen.
    pub fn from_fragment(fragment: Option<&str>) -> Self {
        match fragment.map(|f| f.trim().trim_start_matches('#')) {
            Some(f) if f == MEMBERS_FRAGMENT => Self::Members,
            _ => Self::Landing,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Enter,
    Next,
    Prev,
    Search(String),
    Back,
    Reload,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(text) = line.strip_prefix('/') {
            return Some(Self::Search(text.to_string()));
        }
        if let Some(text) = line.strip_prefix("search ") {
            return Some(Self::Search(text.to_string()));
        }
        match line.trim().to_lowercase().as_str() {
            "" | "e" | "enter" => Some(Self::Enter),
            "n" | "next" => Some(Self::Next),
            "p" | "prev" => Some(Self::Prev),
            "b" | "back" => Some(Self::Back),
            "r" | "reload" => Some(Self::Reload),
            "q" | "quit" | "exit" => Some(Self::Quit),
            "search" => Some(Self::Search(String::new())),
            _ => None,
        }
    }
}

/// A successful entry into the members screen.
#[derive(Clone, Debug)]
pub struct Entered {
    pub plan: RenderPlan,
    pub report: DecodeReport,
}

/// Owns the one mutable copy of the roster and view state.
///
/// "Back" is a full reset: callers drop the session and build a new one.
#[derive(Clone, Debug)]
pub struct Session {
    screen: Screen,
    all_members: Vec<MemberRecord>,
    leaders: Vec<MemberRecord>,
    state: ViewState,
    loaded: bool,
    load_error: Option<String>,
}

impl Session {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            all_members: Vec::new(),
            leaders: Vec::new(),
            state: ViewState::default(),
            loaded: false,
            load_error: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn all_members(&self) -> &[MemberRecord] {
        &self.all_members
    }

    pub fn leaders(&self) -> &[MemberRecord] {
        &self.leaders
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Switches to the members screen and resets the view. Data arrives via [`Self::apply_load`].
    pub fn begin_members_view(&mut self) {
        self.screen = Screen::Members;
        self.state.on_enter_members_view();
    }

    /// Applies a finished fetch. Every completion overwrites the previous one.
    pub fn apply_load(
        &mut self,
        result: Result<Vec<MemberRecord>, FetchError>,
    ) -> Result<RenderPlan, FetchError> {
        match result {
            Ok(members) => {
                self.leaders = roster::leaders(&members);
                self.all_members = members;
                self.loaded = true;
                self.load_error = None;
                Ok(self.refresh())
            }
            Err(e) => {
                self.all_members.clear();
                self.leaders.clear();
                self.loaded = false;
                self.load_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn enter_members_view(
        &mut self,
        loader: &RosterLoader,
        source: &RosterSource,
    ) -> Result<Entered, FetchError> {
        self.begin_members_view();
        match loader.load_source(source).await {
            Ok(loaded) => {
                let plan = self.apply_load(Ok(loaded.members))?;
                Ok(Entered {
                    plan,
                    report: loaded.report,
                })
            }
            Err(e) => self.apply_load(Err(e)).map(|plan| Entered {
                plan,
                report: DecodeReport::default(),
            }),
        }
    }

    pub fn search(&mut self, text: &str) -> RenderPlan {
        self.state.on_search_input(text);
        self.refresh()
    }

    pub fn next_page(&mut self) -> RenderPlan {
        self.state.on_next_page();
        self.refresh()
    }

    pub fn prev_page(&mut self) -> RenderPlan {
        self.state.on_prev_page();
        self.refresh()
    }

    /// Re-runs the projection and stores the clamped state back.
    pub fn refresh(&mut self) -> RenderPlan {
        let plan = view::project(&self.all_members, &self.leaders, &self.state);
        self.state = plan.state.clone();
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of(members: usize) -> Vec<MemberRecord> {
        let mut out = vec![MemberRecord::new("Lead", "", "Leader", "")];
        out.extend((0..members).map(|i| MemberRecord::new(&format!("m{i}"), "", "Member", "")));
        out
    }

    #[test]
    fn fragment_deep_link() {
        assert_eq!(Screen::from_fragment(Some("#members")), Screen::Members);
        assert_eq!(Screen::from_fragment(Some("members")), Screen::Members);
        assert_eq!(Screen::from_fragment(Some("#about")), Screen::Landing);
        assert_eq!(Screen::from_fragment(None), Screen::Landing);
    }

    #[test]
    fn command_parsing() {
        assert_eq!(Command::parse(""), Some(Command::Enter));
        assert_eq!(Command::parse("N\n"), Some(Command::Next));
        assert_eq!(Command::parse("prev"), Some(Command::Prev));
        assert_eq!(Command::parse("/ana"), Some(Command::Search("ana".into())));
        assert_eq!(Command::parse("/"), Some(Command::Search(String::new())));
        assert_eq!(
            Command::parse("search Mae Lin"),
            Some(Command::Search("Mae Lin".into()))
        );
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("dance"), None);
    }

    #[test]
    fn reentry_resets_view_state() {
        let mut s = Session::new(Screen::Landing);
        s.begin_members_view();
        s.apply_load(Ok(roster_of(40))).unwrap();
        s.next_page();
        s.search("m1");
        assert_eq!(s.state().filter_text, "m1");

        s.begin_members_view();
        assert_eq!(s.screen(), Screen::Members);
        assert_eq!(s.state(), &ViewState::default());
    }

    #[test]
    fn clamped_page_is_stored_back() {
        let mut s = Session::new(Screen::Members);
        s.apply_load(Ok(roster_of(40))).unwrap();
        s.next_page();
        s.next_page();
        s.next_page();
        assert_eq!(s.state().current_page, 3);

        let plan = s.apply_load(Ok(roster_of(20))).unwrap();
        assert_eq!(plan.state.current_page, 2);
        assert_eq!(s.state().current_page, 2);
        assert_eq!(s.prev_page().state.current_page, 1);
        assert_eq!(s.prev_page().state.current_page, 1);
    }

    #[test]
    fn failed_load_clears_previous_data() {
        let mut s = Session::new(Screen::Members);
        s.apply_load(Ok(roster_of(3))).unwrap();
        assert!(s.is_loaded());
        let err = s.apply_load(Err(FetchError::NonOkStatus {
            url: "http://sheet".into(),
            status: 500,
        }));
        assert!(err.is_err());
        assert!(!s.is_loaded());
        assert!(s.all_members().is_empty());
        assert!(s.leaders().is_empty());
        assert!(s.load_error().unwrap().contains("500"));
    }

    #[test]
    fn last_completed_load_wins() {
        let mut s = Session::new(Screen::Members);
        let first = roster_of(2);
        let second = vec![MemberRecord::new("Solo", "", "Member", "")];
        s.apply_load(Ok(second)).unwrap();
        s.apply_load(Ok(first.clone())).unwrap();
        assert_eq!(s.all_members(), first.as_slice());
    }
}
