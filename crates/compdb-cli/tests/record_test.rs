use anyhow::Result;
use compdb_testing::TestWorld;
use compdb_testing::assertions::{assert_files, assert_unique_files, find_entry};
use compdb_testing::fixtures::{DEBUG_FLAGS, RELEASE_FLAGS, cl_command, quoted_cl_command};

#[test]
fn test_record_writes_one_entry_per_source() -> Result<()> {
    let world = TestWorld::new()
        .with_compile("app.vcxproj", &cl_command(DEBUG_FLAGS, &["main.cpp", "util.cpp"]));

    let result = world.record(&[])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Wrote 2 entries"));

    let records = world.read_database()?;
    assert_files(&records, &["main.cpp", "util.cpp"])?;

    let main = find_entry(&records, "main.cpp")?;
    assert_eq!(main.directory, world.root().to_string_lossy());
    assert!(main.command.starts_with(
        r#""C:\Program Files\Microsoft Visual Studio\2022\Community\VC\Tools\MSVC\14.38.33130\bin\HostX64\x64\CL.exe" /c"#
    ));
    assert!(main.command.ends_with("main.cpp util.cpp"));
    Ok(())
}

#[test]
fn test_merge_mode_accumulates_across_builds() -> Result<()> {
    let mut world = TestWorld::new()
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["a.cpp", "b.cpp"]));
    assert!(world.record(&[])?.success());

    world.clear_events();
    let world = world
        .with_compile("app.vcxproj", &quoted_cl_command(RELEASE_FLAGS, &["b.cpp"]))
        .with_compile("lib.vcxproj", &quoted_cl_command(RELEASE_FLAGS, &["c.cpp"]));
    let result = world.record(&[])?;
    assert!(result.success(), "stderr: {}", result.stderr());

    let records = world.read_database()?;
    assert_unique_files(&records)?;
    assert_files(&records, &["a.cpp", "b.cpp", "c.cpp"])?;

    assert!(find_entry(&records, "a.cpp")?.command.contains("/Od"));
    let updated = find_entry(&records, "b.cpp")?;
    assert!(updated.command.contains("/O2"));
    assert!(!updated.command.contains("/Od"));
    Ok(())
}

#[test]
fn test_stream_mode_keeps_every_record() -> Result<()> {
    let world = TestWorld::new()
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["a.cpp"]))
        .with_compile("app.vcxproj", &quoted_cl_command(RELEASE_FLAGS, &["a.cpp"]));

    let result = world.record(&["--mode", "stream"])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("(stream)"));

    let text = world.read_database_text()?;
    assert!(text.starts_with("[\n"));
    assert!(text.ends_with("\n]\n"));

    let records = world.read_database()?;
    assert_eq!(records.len(), 2);
    Ok(())
}

#[test]
fn test_stream_mode_from_parameters() -> Result<()> {
    let world = TestWorld::new()
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["a.cpp"]));
    let events = world.write_events()?;
    let output = world.root().join("streamed.json");
    let parameters = format!("path:{};mode:stream", output.display());

    let result = world.run(&[
        "record",
        "--events",
        &events.to_string_lossy(),
        "-p",
        &parameters,
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr());

    let text = std::fs::read_to_string(&output)?;
    assert!(text.starts_with("[\n{"));
    Ok(())
}

#[test]
fn test_task_filter_accepts_custom_marker() -> Result<()> {
    let world = TestWorld::new()
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["a.cpp"]))
        .with_event(
            "ClangTidyTask",
            "app.vcxproj",
            &quoted_cl_command(DEBUG_FLAGS, &["b.cpp"]),
        )
        .with_event("Link", "app.vcxproj", "link.exe /OUT:app.exe a.obj b.obj");

    let result = world.record(&["-p", "task:Clang"])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("3 events, 2 accepted"));

    let records = world.read_database()?;
    assert_files(&records, &["a.cpp", "b.cpp"])?;
    Ok(())
}

#[test]
fn test_other_tasks_are_ignored_without_marker() -> Result<()> {
    let world = TestWorld::new()
        .with_event(
            "ClangTidyTask",
            "app.vcxproj",
            &quoted_cl_command(DEBUG_FLAGS, &["b.cpp"]),
        );

    let result = world.record(&[])?;
    assert!(result.success(), "stderr: {}", result.stderr());

    let records = world.read_database()?;
    assert!(records.is_empty());
    Ok(())
}

#[test]
fn test_bad_invocations_are_skipped() -> Result<()> {
    let world = TestWorld::new()
        .with_compile("app.vcxproj", "")
        .with_compile("app.vcxproj", &quoted_cl_command("/c /nologo", &[]))
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["ok.cpp"]));

    let result = world.record(&[])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("1 skipped, 1 without sources"));

    let records = world.read_database()?;
    assert_files(&records, &["ok.cpp"])?;
    Ok(())
}

#[test]
fn test_unknown_parameter_exits_with_config_code() -> Result<()> {
    let world = TestWorld::new();

    let result = world.record(&["-p", "verbosity:high"])?;
    assert_eq!(result.code(), Some(2));
    assert!(result.stderr().contains("verbosity"));
    assert!(!world.output_path().exists());
    Ok(())
}

#[test]
fn test_unwritable_output_exits_with_open_code() -> Result<()> {
    let world = TestWorld::new()
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["a.cpp"]));
    let events = world.write_events()?;
    let output = world.root().join("missing").join("out.json");

    let result = world.run(&[
        "record",
        "--events",
        &events.to_string_lossy(),
        "--output",
        &output.to_string_lossy(),
    ])?;
    assert_eq!(result.code(), Some(3));
    Ok(())
}

#[test]
fn test_missing_event_file_leaves_database_untouched() -> Result<()> {
    let world = TestWorld::new();
    std::fs::write(world.output_path(), "[]\n")?;

    let result = world.run(&[
        "record",
        "--events",
        "no-such-events.jsonl",
        "--output",
        &world.output_path().to_string_lossy(),
        "--mode",
        "stream",
    ])?;
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("no-such-events.jsonl"));
    assert_eq!(world.read_database_text()?, "[]\n");
    Ok(())
}

#[test]
fn test_corrupt_database_is_replaced() -> Result<()> {
    let world = TestWorld::new()
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["a.cpp"]));
    std::fs::write(world.output_path(), "{ not a database")?;

    let result = world.record(&[])?;
    assert!(result.success(), "stderr: {}", result.stderr());

    let records = world.read_database()?;
    assert_files(&records, &["a.cpp"])?;
    Ok(())
}

const INVALID_UTF8_EVENT: &[u8] =
    b"{\"task_name\":\"CL\",\"project_file\":\"app.vcxproj\",\"command_line\":\"cl.exe /c \xff.cpp\"}";

#[test]
fn test_undecodable_event_line_does_not_lose_database() -> Result<()> {
    let world = TestWorld::new()
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["a.cpp"]))
        .with_raw_line(INVALID_UTF8_EVENT)
        .with_raw_line(b"{ truncated")
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["c.cpp"]));

    let result = world.record(&[])?;
    assert_eq!(result.code(), Some(0), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("2 malformed"));

    let records = world.read_database()?;
    assert_files(&records, &["a.cpp", "c.cpp"])?;
    Ok(())
}

#[test]
fn test_undecodable_event_line_keeps_stream_terminated() -> Result<()> {
    let world = TestWorld::new()
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["a.cpp"]))
        .with_raw_line(INVALID_UTF8_EVENT)
        .with_compile("app.vcxproj", &quoted_cl_command(DEBUG_FLAGS, &["c.cpp"]));

    let result = world.record(&["--mode", "stream"])?;
    assert_eq!(result.code(), Some(0), "stderr: {}", result.stderr());
    assert!(world.read_database_text()?.ends_with("\n]\n"));

    let records = world.read_database()?;
    assert_files(&records, &["a.cpp", "c.cpp"])?;
    Ok(())
}
