use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::loader::{FetchError, LoaderOptions, RosterLoader, RosterSource};
use crate::roster::{self, MemberRecord};
use crate::session::{Screen, Session};
use crate::view::{self, ViewState, PAGE_SIZE};

const SCENARIO_CSV: &str = "Name,Link,Role,Picture
Alice,https://fb.com/alice,Leader,pic1.jpg
Bob,https://fb.com/bob,Member,pic2.jpg
Cara,,Member,
";

/// Serves one canned HTTP/1.1 response per connection and returns the base URL.
async fn serve(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut sock, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = sock.read(&mut buf).await;
            let resp = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: text/csv\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = sock.write_all(resp.as_bytes()).await;
            let _ = sock.shutdown().await;
        }
    });
    format!("http://{addr}/pub?output=csv")
}

fn names(records: &[MemberRecord]) -> Vec<&str> {
    records.iter().map(|m| m.name.as_str()).collect()
}

fn loader() -> RosterLoader {
    RosterLoader::new(&LoaderOptions {
        timeout_seconds: 5,
        proxy: None,
    })
    .unwrap()
}

#[test]
fn header_is_always_skipped() {
    for n in 0..5usize {
        let mut text = String::from("Alice,,Member,");
        for i in 0..n {
            text.push_str(&format!("\nm{i},,Member,"));
        }
        assert_eq!(roster::decode(&text).len(), n);
    }
}

#[test]
fn role_partition() {
    let all = vec![
        MemberRecord::new("Ana", "", "Leader", ""),
        MemberRecord::new("Ben", "", "Member", ""),
        MemberRecord::new("Vee", "", "Visitor", ""),
        MemberRecord::new("Lee", "", "leader", ""),
    ];
    let leaders = roster::leaders(&all);
    let members = roster::default_members(&all);
    assert_eq!(names(&leaders), vec!["Ana"]);
    assert_eq!(names(&members), vec!["Ben"]);
    assert!(leaders.iter().all(|l| !members.contains(l)));

    let mut state = ViewState::default();
    state.on_search_input("vis");
    let plan = view::project(&all, &leaders, &state);
    assert_eq!(names(&plan.member_cards), vec!["Vee"]);

    let plan = view::project(&all, &leaders, &ViewState::default());
    assert!(!plan.member_cards.iter().any(|m| m.name == "Vee"));
}

#[test]
fn search_overrides_pagination_and_hides_leaders() {
    let mut all = vec![MemberRecord::new("Banana", "", "Leader", "")];
    for i in 0..40 {
        all.push(MemberRecord::new(&format!("Hana{i}"), "", "Member", ""));
    }
    all.push(MemberRecord::new("Zoe", "", "Guest", ""));
    let leaders = roster::leaders(&all);

    let mut state = ViewState {
        filter_text: String::new(),
        current_page: 2,
    };
    state.on_search_input("ANA");
    let plan = view::project(&all, &leaders, &state);
    assert_eq!(plan.member_cards.len(), 41);
    assert!(plan.member_cards.len() > PAGE_SIZE);
    assert_eq!(plan.member_cards[0].name, "Banana");
    assert!(!plan.show_leader_section);
    assert!(plan.leader_cards.is_empty());
    assert!(!plan.show_pagination);
    assert_eq!(plan.page_label, None);
    assert_eq!(plan.state.current_page, 1);
}

#[test]
fn scenario_sheet() {
    let all = roster::decode(SCENARIO_CSV);
    let leaders = roster::leaders(&all);
    assert_eq!(names(&leaders), vec!["Alice"]);
    assert_eq!(names(&roster::default_members(&all)), vec!["Bob", "Cara"]);

    let plan = view::project(&all, &leaders, &ViewState::default());
    assert!(plan.show_leader_section);
    assert_eq!(names(&plan.leader_cards), vec!["Alice"]);
    assert_eq!(names(&plan.member_cards), vec!["Bob", "Cara"]);
    assert_eq!(plan.total_pages, 1);
    assert!(!plan.show_pagination);

    let cara = &plan.member_cards[1];
    assert_eq!(cara.profile_href(), "#");
    assert_eq!(cara.picture_src(), "https://via.placeholder.com/150");

    let mut state = ViewState::default();
    state.on_search_input("a");
    let plan = view::project(&all, &leaders, &state);
    // "Bob" / "Member" has no "a" in either searched field
    assert_eq!(names(&plan.member_cards), vec!["Alice", "Cara"]);
    assert!(!plan.show_leader_section);

    state.on_search_input("b");
    let plan = view::project(&all, &leaders, &state);
    assert_eq!(names(&plan.member_cards), vec!["Bob", "Cara"]);
}

#[tokio::test]
async fn loader_decodes_sheet_over_http() {
    let url = serve("200 OK", SCENARIO_CSV).await;
    let members = loader().load(&url).await.unwrap();
    assert_eq!(names(&members), vec!["Alice", "Bob", "Cara"]);
    assert_eq!(members[0].profile_link, "https://fb.com/alice");
}

#[tokio::test]
async fn loader_rejects_non_ok_status() {
    let url = serve("404 Not Found", "missing").await;
    match loader().load(&url).await {
        Err(FetchError::NonOkStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected NonOkStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn loader_reports_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = format!("http://{addr}/sheet.csv");
    assert!(matches!(
        loader().load(&url).await,
        Err(FetchError::Network { .. })
    ));
}

#[tokio::test]
async fn session_enters_members_view_from_deep_link() {
    let url = serve("200 OK", SCENARIO_CSV).await;
    let mut session = Session::new(Screen::from_fragment(Some("#members")));
    assert_eq!(session.screen(), Screen::Members);

    let entered = session
        .enter_members_view(&loader(), &RosterSource::Url(url))
        .await
        .unwrap();
    assert!(session.is_loaded());
    assert_eq!(names(session.leaders()), vec!["Alice"]);
    assert_eq!(names(&entered.plan.member_cards), vec!["Bob", "Cara"]);
    assert_eq!(entered.report.rows, 3);
    assert_eq!(entered.report.dropped_unnamed, 0);
}

#[tokio::test]
async fn session_load_failure_leaves_grid_empty() {
    let url = serve("500 Internal Server Error", "").await;
    let mut session = Session::new(Screen::Landing);
    let result = session
        .enter_members_view(&loader(), &RosterSource::Url(url))
        .await;
    assert!(result.is_err());
    assert_eq!(session.screen(), Screen::Members);
    assert!(session.all_members().is_empty());
    assert!(session.load_error().is_some());
}

#[tokio::test]
async fn file_source_uses_the_same_decoder() {
    let path = std::env::temp_dir().join(format!("rosterboard-{}.csv", std::process::id()));
    tokio::fs::write(&path, SCENARIO_CSV).await.unwrap();
    let source = RosterSource::File(path.to_string_lossy().to_string());
    let loaded = loader().load_source(&source).await.unwrap();
    assert_eq!(names(&loaded.members), vec!["Alice", "Bob", "Cara"]);
    assert_eq!(loaded.report.rows, 3);
    let _ = tokio::fs::remove_file(&path).await;

    let missing = RosterSource::File("/nonexistent/rosterboard.csv".to_string());
    assert!(matches!(
        loader().load_source(&missing).await,
        Err(FetchError::Read { .. })
    ));
}
