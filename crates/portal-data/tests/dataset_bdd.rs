//! Behavioural tests for dataset aggregation.
//!
//! Scenarios cover record exclusion, the tolerated dangling skill relation,
//! read-time cover fallback, and the development/production build policy.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use portal_data::{Aggregation, BuildMode, Issue, RawRecord, RawSnapshot, build_dataset};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

// ============================================================================
// Raw record builders
// ============================================================================

const TIMESTAMP: &str = "2022-03-23T08:31:54.500Z";

fn raw_user(id: &str) -> RawRecord {
    RawRecord::new()
        .with_text("id", id)
        .with_text("name", "John Smith")
        .with_text("email", "john@smith.name")
        .with_list("slackId", ["slack-id"])
        .with_text("state", "confirmed")
        .with_text("createdAt", TIMESTAMP)
        .with_text("lastModifiedAt", TIMESTAMP)
}

fn raw_project(id: &str) -> RawRecord {
    RawRecord::new()
        .with_text("id", id)
        .with_text("name", "Cedu")
        .with_text("slug", id)
        .with_text("logoUrl", format!("https://x/{id}/logo.png"))
        .with_text("coverImageUrl", format!("https://x/{id}/cover.png"))
        .with_text("state", "running")
}

fn raw_opportunity(id: &str, project: &str, owner: &str) -> RawRecord {
    RawRecord::new()
        .with_text("id", id)
        .with_text("name", "Editor")
        .with_text("summary", "Help us **edit**.")
        .with_text("timeRequirements", "2 hours a week")
        .with_text("contactUrl", "https://x/contact")
        .with_list("projectId", [project])
        .with_list("ownerId", [owner])
        .with_text("status", "live")
}

// ============================================================================
// World
// ============================================================================

/// Test world holding the raw snapshot and the aggregation built from it.
#[derive(Default, ScenarioState)]
struct World {
    snapshot: Slot<RawSnapshot>,
    aggregation: Slot<Aggregation>,
}

impl World {
    /// Applies `change` to the snapshot under construction.
    fn edit_snapshot(&self, change: impl FnOnce(&mut RawSnapshot)) {
        let mut snapshot = self.snapshot.get().unwrap_or_default();
        change(&mut snapshot);
        self.snapshot.set(snapshot);
    }

    /// Extracts the aggregation from the world state.
    fn aggregation(&self) -> Aggregation {
        self.aggregation.get().expect("dataset should be built")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a content snapshot with project {project} and user {user}")]
fn a_content_snapshot(world: &World, project: String, user: String) {
    world.snapshot.set(RawSnapshot {
        users: vec![raw_user(&user)],
        projects: vec![raw_project(&project)],
        ..RawSnapshot::default()
    });
}

#[given("an opportunity {id} in project {project} owned by {owner}")]
fn an_opportunity(world: &World, id: String, project: String, owner: String) {
    world.edit_snapshot(|snapshot| {
        snapshot
            .opportunities
            .push(raw_opportunity(&id, &project, &owner));
    });
}

#[given("a skill {id} named {name} in field {field}")]
fn a_skill(world: &World, id: String, name: String, field: String) {
    world.edit_snapshot(|snapshot| {
        snapshot.skills.push(
            RawRecord::new()
                .with_text("id", &id)
                .with_text("name", name)
                .with_text("field", field),
        );
    });
}

#[given("user {id} selected skills {first} and {second}")]
fn user_selected_skills(world: &World, id: String, first: String, second: String) {
    world.edit_snapshot(|snapshot| {
        for user in &mut snapshot.users {
            if user.id() == Some(id.as_str()) {
                *user = raw_user(&id).with_list("skills", [first.as_str(), second.as_str()]);
            }
        }
    });
}

#[given("a user {id} with state {state}")]
fn a_user_with_state(world: &World, id: String, state: String) {
    world.edit_snapshot(|snapshot| {
        snapshot.users.push(raw_user(&id).with_text("state", state));
    });
}

// ============================================================================
// When steps
// ============================================================================

#[when("the dataset is built")]
fn the_dataset_is_built(world: &World) {
    let snapshot = world.snapshot.get().expect("snapshot should be set");
    world.aggregation.set(build_dataset(&snapshot));
}

// ============================================================================
// Then steps
// ============================================================================

#[then("opportunity {id} is kept")]
fn opportunity_is_kept(world: &World, id: String) {
    assert!(world.aggregation().dataset.opportunity(&id).is_some());
}

#[then("opportunity {id} is excluded")]
fn opportunity_is_excluded(world: &World, id: String) {
    assert!(world.aggregation().dataset.opportunity(&id).is_none());
}

#[then("user {id} is excluded")]
fn user_is_excluded(world: &World, id: String) {
    assert!(world.aggregation().dataset.user(&id).is_none());
}

#[then("the report has exactly {count:usize} dangling reference for {id}")]
fn report_has_dangling_references(world: &World, count: usize, id: String) {
    let aggregation = world.aggregation();
    let dangling = aggregation
        .report
        .entries()
        .iter()
        .filter(|entry| entry.record_id.as_deref() == Some(id.as_str()))
        .filter(|entry| matches!(entry.issue, Issue::DanglingReference { .. }))
        .count();
    assert_eq!(dangling, count);
    assert_eq!(aggregation.report.len(), count);
}

#[then("user {id} resolves {count:usize} skill")]
fn user_resolves_skills(world: &World, id: String, count: usize) {
    let aggregation = world.aggregation();
    let user = aggregation.dataset.user(&id).expect("user should be kept");
    assert_eq!(aggregation.dataset.skills_of(user).len(), count);
}

#[then("the report is empty")]
fn the_report_is_empty(world: &World) {
    let report = world.aggregation().report;
    assert!(report.is_empty(), "unexpected entries: {report:?}");
}

#[then("the effective cover image of {id} is {url}")]
fn effective_cover_image(world: &World, id: String, url: String) {
    let aggregation = world.aggregation();
    let opportunity = aggregation
        .dataset
        .opportunity(&id)
        .expect("opportunity should be kept");
    assert_eq!(
        aggregation.dataset.effective_cover_image(opportunity),
        Ok(url.as_str())
    );
}

#[then("opportunity {id} has no cover image of its own")]
fn has_no_own_cover_image(world: &World, id: String) {
    let aggregation = world.aggregation();
    let opportunity = aggregation
        .dataset
        .opportunity(&id)
        .expect("opportunity should be kept");
    assert_eq!(opportunity.cover_image_url, None);
}

#[then("a development build fails")]
fn a_development_build_fails(world: &World) {
    assert!(world.aggregation().report.enforce(BuildMode::Development).is_err());
}

#[then("a production build proceeds")]
fn a_production_build_proceeds(world: &World) {
    assert!(world.aggregation().report.enforce(BuildMode::Production).is_ok());
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Opportunity pointing at a missing project is excluded"
)]
fn opportunity_pointing_at_missing_project_is_excluded(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Retired skills are filtered without a report"
)]
fn retired_skills_are_filtered_without_a_report(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Opportunity inherits its project's cover image"
)]
fn opportunity_inherits_project_cover_image(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Undecodable records fail a development build only"
)]
fn undecodable_records_fail_development_build_only(world: World) {
    let _ = world;
}
