#[cfg(test)]
mod tests {
    use crate::core::LightCurve;
    use crate::error::ToolkitError;
    use crate::io::loaders::{LightCurveLoader, WORKSHOP_DATA_DIR};
    use crate::parsing::CsvLayout;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_curve() -> LightCurve {
        LightCurve::new(
            vec![0.0, 0.5, 1.0, 1.5],
            vec![1.0, 0.996, 0.996, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_candidate_paths_order() {
        let extra = vec![PathBuf::from("/data")];
        let paths = LightCurveLoader::candidate_paths("x.csv", &extra);

        assert_eq!(paths[0], PathBuf::from("x.csv"));
        assert_eq!(paths[1], PathBuf::from(WORKSHOP_DATA_DIR).join("x.csv"));
        assert_eq!(paths.last(), Some(&PathBuf::from("/data/x.csv")));
        assert_eq!(paths.len(), 5);
    }

    #[test]
    fn test_resolve_reports_all_tried_paths() {
        let err = LightCurveLoader::resolve("no_such_light_curve_file.csv", &[]).unwrap_err();
        match err {
            ToolkitError::DataNotFound { file, tried } => {
                assert_eq!(file, "no_such_light_curve_file.csv");
                assert_eq!(tried.len(), 4);
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_with_search_uses_extra_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search_target.csv");
        LightCurveLoader::save_to_file(&path, &sample_curve(), &CsvLayout::default(), &[]).unwrap();

        let result = LightCurveLoader::load_with_search(
            "search_target.csv",
            &[dir.path().to_path_buf()],
            &CsvLayout::default(),
        )
        .unwrap();

        assert_eq!(result.path, path);
        assert_eq!(result.curve, sample_curve());
    }

    #[test]
    fn test_load_from_missing_file_is_not_found() {
        let result = LightCurveLoader::load_from_file(
            &PathBuf::from("/missing/kepler22b_data.csv"),
            &CsvLayout::kepler(),
        );
        assert!(matches!(result, Err(ToolkitError::DataNotFound { .. })));
    }

    #[test]
    fn test_load_malformed_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "time,flux\n1.0,bright\n").unwrap();

        let result = LightCurveLoader::load_from_file(&path, &CsvLayout::commented_with_header());
        assert!(matches!(result, Err(ToolkitError::Load(_))));
    }

    /// Kepler files need exactly five preamble lines to round-trip
    #[test]
    fn test_save_kepler_layout_pads_preamble() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kepler.csv");
        LightCurveLoader::save_to_file(
            &path,
            &sample_curve(),
            &CsvLayout::kepler(),
            &["Kepler-22 simulated light curve".to_string()],
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let preamble: Vec<&str> = contents.lines().take(5).collect();
        assert_eq!(preamble[0], "# Kepler-22 simulated light curve");
        assert_eq!(preamble[4], "time,flux");

        let loaded = LightCurveLoader::load_from_file(&path, &CsvLayout::kepler()).unwrap();
        assert_eq!(loaded.curve, sample_curve());
    }

    /// Header-less layouts must not get a header row written
    #[test]
    fn test_save_commented_layout_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trappist.csv");
        let curve = sample_curve();

        LightCurveLoader::save_to_file(
            &path,
            &curve,
            &CsvLayout::commented(),
            &["TRAPPIST-1 photometry".to_string()],
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("time,flux"));

        let loaded = LightCurveLoader::load_from_file(&path, &CsvLayout::commented()).unwrap();
        assert_eq!(loaded.curve, curve);
    }
}
