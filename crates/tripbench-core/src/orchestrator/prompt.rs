//! Orchestrator-level prompt: route, agent roles, output rules and leg table.

use crate::agents::{FLIGHT_ROLE, HOTEL_ROLE, PLANNER_ROLE};
use crate::domain::scenario::Scenario;
use crate::protocol::TASK_MARKER;

/// Heading of the per-leg table the model must follow.
pub const LEG_TABLE_HEADER: &str = "LEG TABLE (follow exactly):";

/// Build the orchestrator prompt for `scenario`.
///
/// Pure: equal scenarios always produce byte-identical prompts.
pub fn build_orchestrator_prompt(scenario: &Scenario) -> String {
    let mut lines: Vec<String> = vec![
        "You are the Orchestrator LLM for TripBenchmark.".into(),
        format!("ROUTE: {}", scenario.route()),
        String::new(),
        "Available agents (use these role names exactly):".into(),
        format!("- {FLIGHT_ROLE}  – choose a flight for an origin→dest leg."),
        format!("- {HOTEL_ROLE}   – book accommodation at the arrival city."),
        format!("- {PLANNER_ROLE} – create day-by-day activities at the arrival city."),
        String::new(),
        "OUTPUT FORMAT (strict):".into(),
        "• Emit ONLY lines in this exact form, one task per line:".into(),
        format!(r#"{TASK_MARKER} <AgentRole> | {{"key":"value","key2":"value2"}}"#),
        format!("• No Markdown, no prose, no blank lines, no extra spaces around {TASK_MARKER}."),
        "• JSON must be single-line, double-quoted keys/strings, no trailing commas.".into(),
        format!("• AgentRole ∈ {{{FLIGHT_ROLE}, {HOTEL_ROLE}, {PLANNER_ROLE}}}."),
        String::new(),
        "For each consecutive pair of cities (i.e., each leg origin→dest):".into(),
        format!("1) Emit a {FLIGHT_ROLE} task with payload:"),
        r#"   {"origin":"<origin>","dest":"<dest>"}"#.into(),
        format!("2) If book_hotel is true for the arrival city, emit a {HOTEL_ROLE} task:"),
        r#"   {"city":"<dest>","nights":<integer_nights>}"#.into(),
        "   - Set nights to the days_to_plan for that arrival city (minimum 1).".into(),
        format!("3) Always emit a {PLANNER_ROLE} task for the arrival city:"),
        r#"   {"city":"<dest>","days":<days_to_plan>}"#.into(),
        String::new(),
        "Do NOT invent cities or legs. Do NOT output keys other than shown.".into(),
        "Do NOT include dates here; sub-agents will handle specifics later.".into(),
        String::new(),
        LEG_TABLE_HEADER.into(),
    ];

    for leg in scenario.legs() {
        lines.push(format!(
            "- Leg {}: {} → {} | book_hotel={} | days_to_plan={}",
            leg.index, leg.origin, leg.dest, leg.book_hotel, leg.days_to_plan
        ));
    }

    lines.extend([
        String::new(),
        "Example (format only; values are illustrative):".into(),
        format!(r#"{TASK_MARKER} {FLIGHT_ROLE} | {{"origin":"Paris","dest":"Tokyo"}}"#),
        format!(r#"{TASK_MARKER} {HOTEL_ROLE} | {{"city":"Tokyo","nights":2}}"#),
        format!(r#"{TASK_MARKER} {PLANNER_ROLE} | {{"city":"Tokyo","days":2}}"#),
        String::new(),
        "Now output the tasks for the LEG TABLE above, and nothing else.".into(),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario::new(
            vec!["New York".into(), "Dubai".into(), "Berlin".into()],
            vec![true, true, false],
            vec![2, 3, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_prompt_lists_route_and_every_leg() {
        let prompt = build_orchestrator_prompt(&scenario());
        assert!(prompt.starts_with("You are the Orchestrator LLM for TripBenchmark.\n"));
        assert!(prompt.contains("ROUTE: New York → Dubai → Berlin"));
        assert!(prompt.contains("- Leg 1: New York → Dubai | book_hotel=true | days_to_plan=3"));
        assert!(prompt.contains("- Leg 2: Dubai → Berlin | book_hotel=false | days_to_plan=1"));
        assert!(prompt.ends_with("Now output the tasks for the LEG TABLE above, and nothing else."));
    }

    #[test]
    fn test_leg_table_follows_its_header() {
        let prompt = build_orchestrator_prompt(&scenario());
        let after = prompt.split(LEG_TABLE_HEADER).nth(1).unwrap();
        assert!(after.trim_start().starts_with("- Leg 1:"));
    }

    #[test]
    fn test_worked_example_lines_are_valid_tasks() {
        let prompt = build_orchestrator_prompt(&scenario());
        let tasks = crate::protocol::parse_tasks(&prompt).unwrap();
        let roles: Vec<&str> = tasks.iter().map(|t| t.role()).collect();
        assert_eq!(roles, vec![FLIGHT_ROLE, HOTEL_ROLE, PLANNER_ROLE]);
    }

    #[test]
    fn test_prompt_is_pure() {
        assert_eq!(
            build_orchestrator_prompt(&scenario()),
            build_orchestrator_prompt(&scenario())
        );
    }

    #[test]
    fn test_single_city_has_empty_leg_table() {
        let s = Scenario::new(vec!["Paris".into()], vec![false], vec![1]).unwrap();
        let prompt = build_orchestrator_prompt(&s);
        assert!(!prompt.contains("- Leg "));
    }
}
