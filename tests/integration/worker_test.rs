use bfff::ir::Case;
use bfff::search::SearchConfig;
use bfff::search::worker::{Request, Response, serve, spawn_worker};

#[test_log::test]
fn test_protocol_session_lifecycle() {
    let handle = spawn_worker(SearchConfig::default().with_seed(9));

    let response = handle.call(Request::Batch { count: 10 }).unwrap();
    assert!(matches!(response, Response::Error { .. }));

    let init = Request::Init {
        cases: vec![Case::new(vec![6.0], 36.0), Case::new(vec![-1.0], 1.0)],
        max_depth: 2,
    };
    assert_eq!(handle.call(init).unwrap(), Response::Ready);

    let mut texts = Vec::new();
    let mut pulled = 0;
    loop {
        match handle.call(Request::Batch { count: 100 }).unwrap() {
            Response::Result(report) => {
                assert!(report.skipped <= report.pulled);
                pulled += report.pulled;
                texts.extend(report.passes.into_iter().map(|p| p.rendered_text));
                if report.exhausted {
                    break;
                }
            }
            other => panic!("Unexpected response: {:?}", other),
        }
    }
    assert!(texts.contains(&"(a) -> a * a".to_string()));
    // 5 leaves, 27 unary and 15 binary factories at depth 2
    assert_eq!(pulled, 515);

    handle.shutdown().unwrap();
}

#[test]
fn test_init_errors_are_reported() {
    let handle = spawn_worker(SearchConfig::default());
    let init = Request::Init {
        cases: vec![Case::new(vec![1.0, 2.0], 3.0), Case::new(vec![1.0], 2.0)],
        max_depth: 2,
    };
    match handle.call(init).unwrap() {
        Response::Error { error } => assert!(error.contains("same number of inputs")),
        other => panic!("Unexpected response: {:?}", other),
    }
    handle.shutdown().unwrap();
}

#[test]
fn test_serve_json_lines() {
    let handle = spawn_worker(SearchConfig::default());
    let input = concat!(
        r#"{"type":"init","cases":[{"inputs":[2,3],"output":6},"#,
        r#"{"inputs":[4,5],"output":20}],"max_depth":2}"#,
        "\n",
        r#"{"type":"batch","count":1000}"#,
        "\n",
    );
    let mut output = Vec::new();
    serve(&handle, input.as_bytes(), &mut output).unwrap();
    handle.shutdown().unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "ready");
    assert_eq!(lines[1]["type"], "result");
    assert_eq!(lines[1]["exhausted"], true);
    let passes = lines[1]["passes"].as_array().unwrap();
    assert!(passes.iter().any(|p| p["rendered_text"] == "(a, b) -> a * b"));
}
