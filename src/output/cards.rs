use colored::Colorize;

use super::{locale, Frame};
use crate::roster::MemberRecord;
use crate::view::RenderPlan;

pub fn card_line(member: &MemberRecord, is_leader: bool) -> String {
    let marker = if is_leader {
        "★".bold().yellow()
    } else {
        "•".bold().white()
    };
    format!(
        "  {} {}  {}  {}",
        marker,
        member.name.bold().white(),
        member.short_link().cyan(),
        member.picture_src().dimmed()
    )
}

fn push_cards(out: &mut String, cards: &[MemberRecord], is_leader: bool) {
    for m in cards {
        out.push_str(&card_line(m, is_leader));
        out.push('\n');
    }
}

fn push_pagination(out: &mut String, plan: &RenderPlan) {
    let Some(label) = plan.page_label.as_deref() else {
        return;
    };
    let prev = if plan.prev_enabled {
        format!("[p] {}", locale::PREV_LABEL).bold().white()
    } else {
        format!("[p] {}", locale::PREV_LABEL).dimmed()
    };
    let next = if plan.next_enabled {
        format!("[n] {}", locale::NEXT_LABEL).bold().white()
    } else {
        format!("[n] {}", locale::NEXT_LABEL).dimmed()
    };
    out.push_str(&format!("\n  {}   {}   {}\n", prev, label.bold().blue(), next));
}

pub fn render_plan_text(plan: &RenderPlan) -> String {
    let mut out = String::new();
    if plan.show_leader_section {
        out.push_str(&format!("\n{}\n", locale::LEADERS_HEADING.bold().yellow()));
        push_cards(&mut out, &plan.leader_cards, true);
    }

    out.push_str(&format!("\n{}", locale::MEMBERS_HEADING.bold().green()));
    if plan.state.search_active() {
        out.push_str(&format!(" ({})", plan.state.filter_text.italic()));
    }
    out.push('\n');
    if plan.member_cards.is_empty() {
        out.push_str(&format!("  {}\n", locale::NO_RESULTS.dimmed()));
    } else {
        push_cards(&mut out, &plan.member_cards, false);
    }

    push_pagination(&mut out, plan);
    out
}

pub fn render_text(frame: Frame<'_>) -> String {
    match frame {
        Frame::Plan(plan) => render_plan_text(plan),
        Frame::LoadFailed => format!(
            "\n{}\n  {}\n",
            locale::MEMBERS_HEADING.bold().green(),
            locale::LOAD_ERROR.bold().red()
        ),
    }
}
