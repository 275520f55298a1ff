use super::{locale, Frame};
use crate::roster::MemberRecord;
use crate::view::RenderPlan;

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn member_card_html(member: &MemberRecord, is_leader: bool) -> String {
    let card_class = if is_leader {
        "member-card leader-card"
    } else {
        "member-card"
    };
    let href = escape_html(member.profile_href());
    format!(
        r#"
            <div class="{card_class}">
                <img src="{picture}" alt="Profile Picture" class="profile-pic">
                <div class="member-info">
                    <h3>{name}</h3>
                    <a href="{href}" target="_blank">{short}</a>
                </div>
                <a href="{href}" target="_blank" class="profile-link"><i class="fab fa-facebook-f"></i></a>
            </div>
        "#,
        picture = escape_html(member.picture_src()),
        name = escape_html(&member.name),
        short = escape_html(&member.short_link()),
    )
}

fn cards_html(cards: &[MemberRecord], is_leader: bool) -> String {
    cards
        .iter()
        .map(|m| member_card_html(m, is_leader))
        .collect::<Vec<_>>()
        .join("")
}

fn display(visible: bool, shown: &'static str) -> &'static str {
    if visible {
        shown
    } else {
        "none"
    }
}

fn disabled(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        " disabled"
    }
}

fn members_page(plan: Option<&RenderPlan>) -> String {
    let (leader_grid, member_grid, show_leaders) = match plan {
        Some(plan) => (
            cards_html(&plan.leader_cards, true),
            cards_html(&plan.member_cards, false),
            plan.show_leader_section,
        ),
        None => (
            String::new(),
            format!("<p>{}</p>", locale::LOAD_ERROR),
            false,
        ),
    };
    let show_pagination = plan.map(|p| p.show_pagination).unwrap_or(false);
    let page_info = plan
        .and_then(|p| p.page_label.as_deref())
        .map(escape_html)
        .unwrap_or_default();
    let search = plan
        .map(|p| escape_html(&p.state.filter_text))
        .unwrap_or_default();

    format!(
        r#"  <div id="members-page">
    <input type="text" id="searchInput" value="{search}">
    <section id="leader-section" style="display: {leader_display}">
      <h2>{leaders_heading}</h2>
      <div class="leader-grid">{leader_grid}</div>
    </section>
    <section id="members-section">
      <h2>{members_heading}</h2>
      <div class="member-grid">{member_grid}</div>
    </section>
    <div class="pagination-controls" style="display: {pagination_display}">
      <button id="prevBtn"{prev_disabled}>{prev}</button>
      <span id="pageInfo">{page_info}</span>
      <button id="nextBtn"{next_disabled}>{next}</button>
    </div>
  </div>
"#,
        leader_display = display(show_leaders, "block"),
        leaders_heading = locale::LEADERS_HEADING,
        members_heading = locale::MEMBERS_HEADING,
        pagination_display = display(show_pagination, "flex"),
        prev_disabled = disabled(plan.map(|p| p.prev_enabled).unwrap_or(false)),
        next_disabled = disabled(plan.map(|p| p.next_enabled).unwrap_or(false)),
        prev = locale::PREV_LABEL,
        next = locale::NEXT_LABEL,
    )
}

pub fn render_html(frame: Frame<'_>) -> Vec<u8> {
    let body = match frame {
        Frame::Plan(plan) => members_page(Some(plan)),
        Frame::LoadFailed => members_page(None),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="th">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{title}</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"/>
</head>
<body>
{body}</body>
</html>
"#,
        title = locale::MEMBERS_HEADING,
    )
    .into_bytes()
}
