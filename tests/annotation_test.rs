use eqclass::{
    dsl::*, parse_examples, Env, Error, Example, ExampleFile, Options, SourcePos,
};

fn options() -> Options<'static> {
    Options {
        discard_logs: true,
        ..Default::default()
    }
}

#[test]
fn header_is_parsed() {
    assert_eq!(
        parse_examples("./tests/fixtures/add.txt").unwrap(),
        Some(add(c1(), x()))
    );
    assert_eq!(
        parse_examples("./tests/fixtures/ite.txt").unwrap(),
        Some(ite(lt(x(), c3()), c1(), c2()))
    );
}

#[test]
fn no_header() {
    assert_eq!(parse_examples("./tests/fixtures/headerless.txt").unwrap(), None);
}

#[test]
fn unknown_identifier_names_the_file() {
    let error = parse_examples("./tests/fixtures/unknown_identifier.txt").unwrap_err();
    match &error {
        Error::Annotation { path, text, error } => {
            assert!(path.ends_with("unknown_identifier.txt"));
            assert_eq!(text, "Sub(x, 1)");
            assert!(matches!(**error, Error::UnknownIdentifier(ref name) if *name == "Sub"));
        }
        other => panic!("expected an annotation error, got {:?}", other),
    }
    assert!(error.to_string().contains("Sub(x, 1)"));
    assert!(error.to_string().contains("unknown_identifier.txt"));
}

#[test]
fn empty_header() {
    let error = parse_examples("./tests/fixtures/empty_header.txt").unwrap_err();
    assert!(matches!(error, Error::Annotation { ref text, .. } if text.is_empty()));
}

#[test]
fn missing_file() {
    assert!(matches!(
        parse_examples("./tests/fixtures/does_not_exist.txt"),
        Err(Error::Io { .. })
    ));
}

#[test]
fn example_file() {
    let logger = options().logger().unwrap();
    let file = ExampleFile::read("./tests/fixtures/add.txt", &logger).unwrap();
    assert_eq!(file.golden, Some(add(c1(), x())));
    assert_eq!(
        file.examples,
        vec![
            Example {
                input: Env::new(1, 0, 0),
                output: 2
            },
            Example {
                input: Env::new(5, 0, 0),
                output: 6
            },
            Example {
                input: Env::new(-3, 7, 2),
                output: -2
            },
        ]
    );

    let golden = file.golden.clone().unwrap();
    assert_eq!(file.violations(&golden).count(), 0);
    assert_eq!(file.violations(&add(c2(), x())).count(), 3);
}

#[test]
fn violations() {
    let logger = options().logger().unwrap();
    let file = ExampleFile::read("./tests/fixtures/ite.txt", &logger).unwrap();
    let golden = file.golden.clone().unwrap();
    let violated = file.violations(&golden).collect::<Vec<_>>();
    assert_eq!(violated.len(), 1);
    assert_eq!(violated[0].to_string(), "x=4, y=0, z=0 -> 1");
}

#[test]
fn headerless_example_file() {
    let logger = options().logger().unwrap();
    let file = ExampleFile::read("./tests/fixtures/headerless.txt", &logger).unwrap();
    assert_eq!(file.golden, None);
    assert_eq!(file.examples.len(), 2);
    assert_eq!(file.examples[0].input, Env::new(1, 2, 3));
}

#[test]
fn malformed_example_line() {
    let logger = options().logger().unwrap();
    let result = ExampleFile::read("./tests/fixtures/malformed_example.txt", &logger);
    assert!(matches!(result, Err(Error::MalformedExample { line: 3, .. })));
}

#[test]
fn lexer_error_position() {
    let error = eqclass::parse_expression("Add(x, 1) + 2").unwrap_err();
    assert!(matches!(error, Error::LexerError(SourcePos::SourcePos { line: 1, col: 11 })));
}
