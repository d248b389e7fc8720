use ir_block_stats::aggregator::run_analysis;
use ir_block_stats::parser::{parse_program_file, InputFormat};
use ir_block_stats::utils::error::ParseError;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::path::Path;

const FACTORIAL_LL: &str = r#"; ModuleID = 'factorial.c'
source_filename = "factorial.c"
target datalayout = "e-m:e-i64:64-f80:128-n8:16:32:64-S128"

; Function Attrs: noinline nounwind
define dso_local i32 @factorial(i32 noundef %0) #0 {
  %2 = icmp slt i32 %0, 2
  br i1 %2, label %3, label %4

3:                                                ; preds = %1
  ret i32 1

4:                                                ; preds = %1
  %5 = sub nsw i32 %0, 1
  %6 = call i32 @factorial(i32 noundef %5)
  %7 = mul nsw i32 %0, %6
  ret i32 %7
}

declare i32 @printf(ptr noundef, ...)

define dso_local i32 @main() #0 {
  %1 = call i32 @factorial(i32 noundef 5)
  %2 = call i32 (ptr, ...) @printf(ptr noundef @.str, i32 noundef %1)
  ret i32 0
}

attributes #0 = { noinline nounwind }
"#;

fn write_input(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_llvm_file_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(dir.path(), "factorial.ll", FACTORIAL_LL);

    let module = parse_program_file(&path, None).unwrap();
    assert_eq!(module.source_name, "factorial.c");

    let stats = run_analysis(&module);
    assert_eq!(stats.function_count(), 2);
    assert_eq!(stats.basic_block_count(), 4);
    assert_eq!(stats.histogram(), &BTreeMap::from([(1, 1), (2, 1), (3, 1), (4, 1)]));
    assert_eq!(stats.max_bucket_value(), 1);
}

#[test]
fn test_json_file_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(
        dir.path(),
        "prog.json",
        r#"{
            "functions": [
                { "name": "empty" },
                { "name": "f", "basic_blocks": [
                    { "instructions": [] },
                    { "instructions": ["br label %x"] },
                    { "instructions": [] }
                ] }
            ]
        }"#,
    );

    let module = parse_program_file(&path, None).unwrap();
    assert_eq!(module.source_name, "prog.json");

    let stats = run_analysis(&module);
    assert_eq!(stats.function_count(), 2);
    assert_eq!(stats.basic_block_count(), 3);
    assert_eq!(stats.histogram(), &BTreeMap::from([(0, 2), (1, 1)]));
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(dir.path(), "module.txt", "define void @f() {\n  ret void\n}\n");

    assert!(matches!(
        parse_program_file(&path, None),
        Err(ParseError::UnknownFormat(_))
    ));

    let module = parse_program_file(&path, Some(InputFormat::Llvm)).unwrap();
    assert_eq!(module.functions.len(), 1);
}

#[test]
fn test_malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(dir.path(), "bad.json", r#"{ "functions": 3 }"#);

    assert!(matches!(
        parse_program_file(&path, None),
        Err(ParseError::JsonError(_))
    ));
}
