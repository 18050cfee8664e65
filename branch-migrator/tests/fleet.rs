use std::path::{Path, PathBuf};

use branch_migrator::fakes::{FakeHosting, FakeWorkingCopy, HostingCall, RecordingReporter};
use branch_migrator::{
    migrate_fleet, Distribution, ExclusionSet, MigrationContext, MigrationTarget, ReposFile,
    RunReport, TemplateRenderer,
};
use tempfile::TempDir;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_manifests() -> (ReposFile, Distribution) {
    let root = fixtures_root();
    (
        ReposFile::from_path(&root.join("ros2.repos.yaml")).unwrap(),
        Distribution::from_path(&root.join("distribution.yaml")).unwrap(),
    )
}

struct Fleet {
    hosting: FakeHosting,
    working_copy: FakeWorkingCopy,
    renderer: TemplateRenderer,
    reporter: RecordingReporter,
    target: MigrationTarget,
    workspace: TempDir,
}

impl Fleet {
    fn new() -> Self {
        Self::with(FakeHosting::default(), |_| FakeWorkingCopy::default())
    }

    fn with(hosting: FakeHosting, working_copy: impl FnOnce(&Path) -> FakeWorkingCopy) -> Self {
        let workspace = TempDir::new().unwrap();
        Self {
            hosting,
            working_copy: working_copy(workspace.path()),
            renderer: TemplateRenderer::new().unwrap(),
            reporter: RecordingReporter::default(),
            target: MigrationTarget::new("kilted", "rolling").unwrap(),
            workspace,
        }
    }

    async fn run(
        &self,
        repos: &mut ReposFile,
        distribution: &mut Distribution,
        exclusions: &ExclusionSet,
        dry_run: bool,
    ) -> RunReport {
        let ctx = MigrationContext {
            hosting: &self.hosting,
            working_copy: &self.working_copy,
            renderer: &self.renderer,
            reporter: &self.reporter,
            target: &self.target,
            workspace: self.workspace.path(),
            dry_run,
        };
        migrate_fleet(&ctx, repos, distribution, exclusions).await
    }
}

fn versions(repos: &ReposFile) -> Vec<&str> {
    repos
        .repositories
        .iter()
        .map(|repo| repo.version.as_str())
        .collect()
}

#[tokio::test]
async fn live_run_migrates_every_repository() {
    let fleet = Fleet::new();
    let (mut repos, mut distribution) = load_manifests();

    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    assert!(!report.has_errors());
    assert_eq!(report.repos_migrated.len(), 5);
    assert!(versions(&repos).iter().all(|version| *version == "kilted"));
    assert_eq!(distribution.version("rclcpp"), Some("kilted"));
    assert_eq!(fleet.working_copy.live_commits().len(), 5);
    assert!(fleet
        .hosting
        .mutations()
        .contains(&HostingCall::RetargetPullRequests {
            repo: "eProsima/Fast-DDS".to_string(),
            from: "2.14.x".to_string(),
            to: "kilted".to_string(),
        }));
}

#[tokio::test]
async fn dry_run_changes_nothing_remote_but_advances_versions() {
    let fleet = Fleet::new();
    let (mut repos, mut distribution) = load_manifests();

    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), true)
        .await;

    assert!(report.dry_run);
    assert!(!report.has_errors());
    assert!(fleet.hosting.mutations().is_empty());
    assert!(fleet.working_copy.live_commits().is_empty());
    assert_eq!(fleet.working_copy.commits().len(), 5);
    assert!(versions(&repos).iter().all(|version| *version == "kilted"));
    assert_eq!(distribution.version("ament_cmake"), Some("kilted"));
    assert!(fleet
        .reporter
        .lines()
        .contains(&" - Would create a new branch kilted from rolling and retarget PRs".to_string()));
}

#[tokio::test]
async fn excluded_repositories_are_left_alone() {
    let fleet = Fleet::new();
    let (mut repos, mut distribution) = load_manifests();
    let exclusions = ExclusionSet::new(["ros2/ros2_documentation", "eProsima/Fast-DDS"]);

    let report = fleet.run(&mut repos, &mut distribution, &exclusions, false).await;

    assert_eq!(
        report.repos_excluded,
        vec!["ros2/ros2_documentation", "eProsima/Fast-DDS"]
    );
    assert_eq!(versions(&repos), vec!["kilted", "kilted", "kilted", "rolling", "2.14.x"]);
    assert_eq!(fleet.working_copy.pulls().len(), 3);
    assert!(fleet
        .hosting
        .calls()
        .iter()
        .all(|call| !format!("{call:?}").contains("Fast-DDS")));
    assert!(fleet
        .reporter
        .lines()
        .contains(&"Excluded eProsima/Fast-DDS since it is on the exclude list".to_string()));
}

#[tokio::test]
async fn mirror_failure_is_isolated_to_its_repository() {
    let fleet = Fleet::with(FakeHosting::default(), |workspace| {
        FakeWorkingCopy::default().failing_push(&workspace.join("ros2/rcl"))
    });
    let (mut repos, mut distribution) = load_manifests();

    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("Error pushing mirror workflow on ros2/rcl: "));
    // The failed mirror does not hold back the branch switch.
    assert_eq!(report.repos_migrated.len(), 5);
    assert_eq!(distribution.version("rcl"), Some("kilted"));
    assert!(fleet
        .hosting
        .mutations()
        .contains(&HostingCall::SetDefaultBranch {
            repo: "ros2/rcl".to_string(),
            branch: "kilted".to_string(),
        }));
}

#[tokio::test]
async fn pull_failure_stops_only_that_repository() {
    let fleet = Fleet::with(FakeHosting::default(), |workspace| {
        FakeWorkingCopy::default().failing_pull(&workspace.join("ros2/rclcpp"))
    });
    let (mut repos, mut distribution) = load_manifests();

    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("Error pulling ros2/rclcpp: "));
    assert_eq!(repos.repositories[2].version, "rolling");
    assert_eq!(distribution.version("rclcpp"), Some("rolling"));
    assert_eq!(report.repos_migrated.len(), 4);
    assert!(fleet
        .hosting
        .calls()
        .iter()
        .all(|call| !format!("{call:?}").contains("ros2/rclcpp")));
}

#[tokio::test]
async fn default_branch_query_failure_keeps_version() {
    let fleet = Fleet::with(
        FakeHosting::default().failing_default_branch("ament/ament_cmake"),
        |_| FakeWorkingCopy::default(),
    );
    let (mut repos, mut distribution) = load_manifests();

    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0]
        .starts_with("Error changing default branch and retargetting PRs on ament/ament_cmake: "));
    assert_eq!(repos.repositories[0].version, "rolling");
    assert_eq!(distribution.version("ament_cmake"), Some("rolling"));
}

#[tokio::test]
async fn retarget_failures_are_summarized_but_not_collected() {
    let fleet = Fleet::with(
        FakeHosting::default().failing_retarget("ros2/rclcpp"),
        |_| FakeWorkingCopy::default(),
    );
    let (mut repos, mut distribution) = load_manifests();

    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    assert!(!report.has_errors());
    assert_eq!(repos.repositories[2].version, "kilted");
    assert!(fleet.reporter.lines().contains(
        &" - Errors updating ros2/rclcpp default branch from rolling to kilted".to_string()
    ));
}

#[tokio::test]
async fn default_branch_is_only_flipped_when_it_is_the_old_branch() {
    let fleet = Fleet::with(
        FakeHosting::default().with_default_branch("ros2/rcl", "humble"),
        |_| FakeWorkingCopy::default(),
    );
    let (mut repos, mut distribution) = load_manifests();

    fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    let mutations = fleet.hosting.mutations();
    assert!(!mutations.contains(&HostingCall::SetDefaultBranch {
        repo: "ros2/rcl".to_string(),
        branch: "kilted".to_string(),
    }));
    assert!(mutations.contains(&HostingCall::CreateBranch {
        repo: "ros2/rcl".to_string(),
        base: "rolling".to_string(),
        new_branch: "kilted".to_string(),
    }));
}

#[tokio::test]
async fn repositories_outside_the_distribution_are_noted() {
    let fleet = Fleet::new();
    let (mut repos, mut distribution) = load_manifests();

    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    assert!(!report.has_errors());
    assert_eq!(repos.repositories[3].version, "kilted");
    assert!(!distribution.contains("ros2_documentation"));
    assert!(fleet.reporter.lines().contains(
        &" - Could not update distribution.yaml, since ros2/ros2_documentation is not in the distribution.yaml"
            .to_string()
    ));
}

#[tokio::test]
async fn second_run_skips_migrated_repositories() {
    let (mut repos, mut distribution) = load_manifests();
    Fleet::new()
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    let fleet = Fleet::new();
    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    assert!(!report.has_errors());
    assert!(report.repos_migrated.is_empty());
    assert_eq!(report.repos_skipped.len(), 5);
    assert!(fleet.hosting.calls().is_empty());
    assert!(fleet.working_copy.pulls().is_empty());
    assert_eq!(distribution.version("rclcpp"), Some("kilted"));
}

#[tokio::test]
async fn branch_creation_failure_does_not_fail_the_repository() {
    let fleet = Fleet::with(
        FakeHosting::default().failing_create_branch("ros2/rclcpp"),
        |_| FakeWorkingCopy::default(),
    );
    let (mut repos, mut distribution) = load_manifests();

    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    assert!(report.errors.is_empty());
    assert_eq!(repos.repositories[2].version, "kilted");
    assert_eq!(distribution.version("rclcpp"), Some("kilted"));
    assert!(report.repos_migrated.contains(&"ros2/rclcpp".to_string()));
}

#[tokio::test]
async fn consolidating_onto_the_repos_branch_skips_only_matching_entries() {
    let fleet = Fleet {
        target: MigrationTarget::new("rolling", "rolling").unwrap(),
        ..Fleet::new()
    };
    let (mut repos, mut distribution) = load_manifests();
    repos.repositories[1].version = "master".to_string();

    let report = fleet
        .run(&mut repos, &mut distribution, &ExclusionSet::default(), false)
        .await;

    assert!(!report.has_errors());
    assert_eq!(
        report.repos_skipped,
        vec!["ament/ament_cmake", "ros2/rclcpp", "ros2/ros2_documentation"]
    );
    assert_eq!(report.repos_migrated, vec!["ros2/rcl", "eProsima/Fast-DDS"]);
    assert!(versions(&repos).iter().all(|version| *version == "rolling"));
    assert_eq!(
        fleet
            .working_copy
            .pulls()
            .iter()
            .map(|pull| pull.version.as_str())
            .collect::<Vec<_>>(),
        vec!["master", "2.14.x"]
    );
    assert!(fleet
        .hosting
        .mutations()
        .contains(&HostingCall::CreateBranch {
            repo: "ros2/rcl".to_string(),
            base: "master".to_string(),
            new_branch: "rolling".to_string(),
        }));
}
