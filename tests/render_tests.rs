use ir_block_stats::aggregator::{run_analysis, Statistics};
use ir_block_stats::ir::Module;
use ir_block_stats::output::{summary_lines, RenderOutcome, Renderer};
use ir_block_stats::utils::error::ReportError;
use std::collections::BTreeMap;

fn scenario_stats() -> Statistics {
    Statistics::from_histogram(1, BTreeMap::from([(2, 2), (5, 1)]))
}

#[test]
fn test_unavailable_renderer_still_summarizes() {
    let stats = scenario_stats();
    let outcome = Renderer::new()
        .with_program("ir-block-stats-missing-renderer")
        .render(&stats, "main.c");

    assert!(matches!(
        outcome,
        RenderOutcome::Skipped(ReportError::RendererUnavailable { .. })
    ));
    assert_eq!(
        summary_lines(&stats)[0],
        "The program has a total of 1 functions and 3 basic blocks."
    );
}

#[test]
fn test_empty_program_unavailable_renderer() {
    let module = Module::new("empty.c");
    let stats = run_analysis(&module);

    let outcome = Renderer::new()
        .with_program("ir-block-stats-missing-renderer")
        .finalize(&module, &stats);

    assert!(outcome.is_skipped());
    assert_eq!(stats.y_range_upper(), 1);
}

#[cfg(unix)]
mod unix {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    /// Renderer that records the script it receives into `capture`
    fn capturing_renderer(capture: &std::path::Path) -> Renderer {
        Renderer::new()
            .with_program("sh")
            .with_args(["-c".to_string(), format!("cat > '{}'", capture.display())])
    }

    #[test]
    fn test_script_reaches_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let capture = dir.path().join("script.gp");
        let scratch = dir.path().join("scratch");
        std::fs::create_dir(&scratch).unwrap();

        let outcome = capturing_renderer(&capture)
            .with_scratch_dir(&scratch)
            .with_keep_data_file(true)
            .render(&scenario_stats(), "main.c");

        let (chart_path, data_file) = match outcome {
            RenderOutcome::Rendered { chart_path, data_file } => (chart_path, data_file),
            other => panic!("expected a rendered outcome, got {:?}", other),
        };
        assert_eq!(chart_path, PathBuf::from("main.c.pdf"));

        let data_file = data_file.expect("data file should be kept");
        assert!(data_file.starts_with(&scratch));
        assert_eq!(std::fs::read_to_string(&data_file).unwrap(), "2 2\n5 1\n");

        let script = std::fs::read_to_string(&capture).unwrap();
        assert_eq!(
            script,
            format!(
                "set terminal pdf\n\
                 set output 'main.c.pdf'\n\
                 set style data histograms\n\
                 set style fill solid\n\
                 set yrange [0:3]\n\
                 plot '{}' using 2:xtic(1) title 'Basic blocks by instruction count' linecolor 'black'\n\
                 exit\n",
                data_file.display()
            )
        );
    }

    #[test]
    fn test_output_dir_is_used_for_chart() {
        let dir = tempfile::tempdir().unwrap();
        let capture = dir.path().join("script.gp");

        let outcome = capturing_renderer(&capture)
            .with_output_dir(dir.path().join("charts"))
            .render(&scenario_stats(), "lib.c");

        let (chart_path, data_file) = match outcome {
            RenderOutcome::Rendered { chart_path, data_file } => (chart_path, data_file),
            other => panic!("expected a rendered outcome, got {:?}", other),
        };
        assert_eq!(chart_path, dir.path().join("charts/lib.c.pdf"));
        assert!(data_file.is_none());

        let script = std::fs::read_to_string(&capture).unwrap();
        assert!(script.contains(&format!("set output '{}'", chart_path.display())));
    }

    #[test]
    fn test_temp_file_failure_skips_rendering() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = Renderer::new()
            .with_program("sh")
            .with_args(["-c", "cat > /dev/null"])
            .with_scratch_dir(dir.path().join("missing"))
            .render(&scenario_stats(), "main.c");

        assert!(matches!(
            outcome,
            RenderOutcome::Skipped(ReportError::TempFileError(_))
        ));
    }

    #[test]
    fn test_renderer_exit_status_is_checked() {
        let outcome = Renderer::new()
            .with_program("sh")
            .with_args(["-c", "cat > /dev/null; exit 3"])
            .render(&scenario_stats(), "main.c");

        match outcome {
            RenderOutcome::Failed { error: ReportError::RendererExit(status), .. } => {
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected a renderer exit failure, got {:?}", other),
        }
    }

    #[test]
    fn test_data_file_removed_after_failure() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = Renderer::new()
            .with_program("sh")
            .with_args(["-c", "cat > /dev/null; exit 1"])
            .with_scratch_dir(dir.path())
            .render(&scenario_stats(), "main.c");

        assert!(matches!(outcome, RenderOutcome::Failed { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
