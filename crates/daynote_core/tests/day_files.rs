use chrono::{NaiveDate, NaiveDateTime};
use daynote_core::{
    Clock, DayFileRepository, EnsureOutcome, EntryValidationError, FixedClock,
    FsDayFileRepository, MemoryLayout, MemoryService, MemoryServiceError, RepoError,
    DEFAULT_TEMPLATE,
};
use std::cell::Cell;
use std::fs;
use std::path::Path;

/// Returns `first` on the first call and `later` on every call after it.
struct MidnightClock {
    calls: Cell<usize>,
    first: NaiveDateTime,
    later: NaiveDateTime,
}

impl Clock for MidnightClock {
    fn now(&self) -> NaiveDateTime {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if call == 0 {
            self.first
        } else {
            self.later
        }
    }
}

fn service_at(root: &Path, hour: u32, minute: u32) -> MemoryService<FsDayFileRepository, FixedClock> {
    let layout = MemoryLayout::new(root);
    let template = layout.template_path.clone();
    let clock = FixedClock::at(2026, 2, 3, hour, minute).unwrap();
    MemoryService::new(FsDayFileRepository::new(layout), clock).with_template(template)
}

#[test]
fn init_creates_file_from_default_template() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 8, 0);

    let outcome = service.ensure_today_file().unwrap();
    let expected_path = dir.path().join("memory").join("2026-02-03.md");
    assert_eq!(outcome, EnsureOutcome::Created(expected_path.clone()));

    let content = fs::read_to_string(&expected_path).unwrap();
    assert!(content.starts_with("# 2026-02-03\n\n## Summary\n"));
    assert!(content.contains("## Context\n- \n"));
    assert!(content.ends_with("## Prompts/Rules\n-\n"));
    assert!(!content.contains("{{date}}"));
}

#[test]
fn init_twice_does_not_rewrite_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 8, 0);

    let first = service.ensure_today_file().unwrap();
    fs::write(first.path(), "# edited by hand\n").unwrap();

    let second = service.ensure_today_file().unwrap();
    assert!(!second.is_created());
    assert_eq!(second.path(), first.path());
    assert_eq!(
        fs::read_to_string(second.path()).unwrap(),
        "# edited by hand\n"
    );
}

#[test]
fn add_on_fresh_file_inserts_entry_before_empty_bullet() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 14, 5);

    let outcome = service.add_entry("Fixed bug").unwrap();
    assert!(outcome.file.is_created());
    assert_eq!(outcome.entry, "- [14:05] Fixed bug");

    let content = fs::read_to_string(outcome.file.path()).unwrap();
    assert!(content.contains("## Context\n- [14:05] Fixed bug\n- \n\n## Prompts/Rules"));
    assert_eq!(content.matches("Fixed bug").count(), 1);
}

#[test]
fn two_adds_keep_insertion_order_under_context() {
    let dir = tempfile::tempdir().unwrap();
    service_at(dir.path(), 9, 0).add_entry("first").unwrap();
    let outcome = service_at(dir.path(), 9, 30).add_entry("second").unwrap();
    assert!(!outcome.file.is_created());

    let content = fs::read_to_string(outcome.file.path()).unwrap();
    assert!(content.contains("## Context\n- [09:00] first\n- [09:30] second\n- \n"));
}

#[test]
fn add_without_context_heading_appends_trailing_block() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 10, 15);
    let path = service.today_file_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "# 2026-02-03\n\n## Notes\n- x\n\n").unwrap();

    service.add_entry("orphan").unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# 2026-02-03\n\n## Notes\n- x\n\n- [10:15] orphan\n"
    );
}

#[test]
fn add_rejects_blank_message_without_creating_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 10, 0);

    let err = service.add_entry("   ").unwrap_err();
    assert!(matches!(
        err,
        MemoryServiceError::InvalidEntry(EntryValidationError::EmptyMessage)
    ));
    assert!(!service.today_file_path().exists());
}

#[test]
fn external_template_region_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let template_dir = dir.path().join("skills").join("memory");
    fs::create_dir_all(&template_dir).unwrap();
    fs::write(
        template_dir.join("MEMORY_TEMPLATE.md"),
        "# Memory template\n\nExplanation.\n\n<!-- TEMPLATE START -->\n# Day {{date}}\n\n## Context\n\n<!-- TEMPLATE END -->\n",
    )
    .unwrap();

    let service = service_at(dir.path(), 11, 11);
    let outcome = service.add_entry("from custom").unwrap();
    assert_eq!(
        fs::read_to_string(outcome.file.path()).unwrap(),
        "# Day 2026-02-03\n\n## Context\n- [11:11] from custom\n"
    );
}

#[test]
fn template_without_markers_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let template_dir = dir.path().join("skills").join("memory");
    fs::create_dir_all(&template_dir).unwrap();
    fs::write(template_dir.join("MEMORY_TEMPLATE.md"), "# just prose\n").unwrap();

    let service = service_at(dir.path(), 8, 0);
    let outcome = service.ensure_today_file().unwrap();
    let expected = DEFAULT_TEMPLATE.replace("{{date}}", "2026-02-03");
    assert_eq!(
        fs::read_to_string(outcome.path()).unwrap(),
        format!("{}\n", expected.trim_end())
    );
}

#[test]
fn today_summary_reads_summary_section() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 8, 0);
    let path = service.today_file_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        "# 2026-02-03\n\n## Summary\n- First\n- Second\n\n## Decisions\n- Decision\n",
    )
    .unwrap();

    let lines = service.today_summary(Some(20)).unwrap();
    assert_eq!(lines, vec!["- First".to_string(), "- Second".to_string()]);
}

#[test]
fn today_summary_reports_missing_file_and_section() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 8, 0);

    let err = service.today_summary(None).unwrap_err();
    assert!(matches!(err, MemoryServiceError::Repo(RepoError::NotFound(_))));

    let path = service.today_file_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "# 2026-02-03\n\n## Context\n- \n").unwrap();
    let err = service.today_summary(None).unwrap_err();
    assert!(matches!(err, MemoryServiceError::SectionNotFound("## Summary")));
}

#[test]
fn repository_round_trip_preserves_content() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDayFileRepository::new(MemoryLayout::new(dir.path()));
    let content = "# 2026-02-03\n\n## Context\n- [09:00] x\n";

    assert!(repo.create("2026-02-03", content).unwrap());
    assert!(!repo.create("2026-02-03", "other").unwrap());
    assert_eq!(repo.read("2026-02-03").unwrap().as_deref(), Some(content));
    assert_eq!(repo.read("2026-02-04").unwrap(), None);

    let err = repo.write("2026-02-04", content).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn init_leaves_existing_non_utf8_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_at(dir.path(), 8, 0);
    let path = service.today_file_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

    let outcome = service.ensure_today_file().unwrap();
    assert_eq!(outcome, EnsureOutcome::Existing(path.clone()));
    assert_eq!(fs::read(&path).unwrap(), vec![0xff, 0xfe, b'\n']);
}

#[test]
fn add_across_midnight_stays_in_one_day_file() {
    let dir = tempfile::tempdir().unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
    let clock = MidnightClock {
        calls: Cell::new(0),
        first: day.and_hms_opt(23, 59, 59).unwrap(),
        later: day.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap(),
    };
    let repo = FsDayFileRepository::new(MemoryLayout::new(dir.path()));
    let service = MemoryService::new(repo, clock);

    let outcome = service.add_entry("late").unwrap();
    let expected = dir.path().join("memory").join("2026-02-03.md");
    assert_eq!(outcome.file, EnsureOutcome::Created(expected.clone()));
    assert!(fs::read_to_string(&expected)
        .unwrap()
        .contains("## Context\n- [23:59] late\n"));
    assert!(!dir.path().join("memory").join("2026-02-04.md").exists());
}
