//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{diagnostics, Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::{render_error, tokenize, Position, Strategy, MK_TOKEN};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnknownCharacter { character: '@' },
        Position { line: 3, column: 7 },
    );

    assert_eq!(error.get_error_name(), "UnknownCharacter");
    assert_eq!(*error.get_position(), Position { line: 3, column: 7 });
    assert!(!error.is_internal());
}

#[test]
fn test_internal_errors() {
    let error = Error::new(
        ErrorImpl::UnknownGroup { lexeme: "x".to_string() },
        Position::start(),
    );

    assert_eq!(error.get_error_name(), "UnknownGroup");
    assert!(error.is_internal());
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_from_token_ignores_regular_tokens() {
    let token = MK_TOKEN!(TokenKind::Identifier, "foo".to_string(), Position::start());
    assert!(Error::from_token(&token).is_none());
}

#[test]
fn test_unknown_group_token_has_no_diagnostic() {
    let token = MK_TOKEN!(TokenKind::ErrorUnknownGroup, "x".to_string(), Position::start());

    assert!(token.kind.is_error());
    assert!(Error::from_token(&token).is_none());
    assert!(diagnostics(&[token]).is_empty());
}

#[test]
fn test_from_unterminated_string() {
    let token = MK_TOKEN!(
        TokenKind::ErrorUnterminatedString,
        "'abc".to_string(),
        Position { line: 2, column: 5 }
    );
    let error = Error::from_token(&token).unwrap();

    assert_eq!(error.kind(), &ErrorImpl::UnterminatedString { quote: '\'' });
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_tip().to_string(), "string is missing its closing '");
}

#[test]
fn test_diagnostics_follow_stream_order() {
    let tokens = tokenize("$a = @;\n/* open", Strategy::Automaton).unwrap();
    let errors = diagnostics(&tokens);

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].kind(), &ErrorImpl::UnknownCharacter { character: '@' });
    assert_eq!(*errors[0].get_position(), Position { line: 1, column: 6 });
    assert_eq!(errors[1].kind(), &ErrorImpl::UnterminatedComment);
    assert_eq!(*errors[1].get_position(), Position { line: 2, column: 1 });
}

#[test]
fn test_error_display() {
    let error = Error::new(ErrorImpl::UnterminatedComment, Position { line: 4, column: 2 });
    assert_eq!(error.to_string(), "unterminated block comment at 4:2");
}

#[test]
fn test_render_error() {
    let source = "<?php\n    $bad = \"ok\" @ \"bad\";\n";
    let tokens = tokenize(source, Strategy::Pattern).unwrap();
    let errors = diagnostics(&tokens);
    assert_eq!(errors.len(), 1);

    let rendered = render_error(&errors[0], source, "demo.php");
    let lines = rendered.lines().collect::<Vec<&str>>();

    assert_eq!(
        lines[0],
        "Error: UnknownCharacter (`@` is not part of the language outside strings and comments)"
    );
    assert_eq!(lines[1], "-> demo.php:2:17");
    assert_eq!(lines[2], "  |");
    assert_eq!(lines[3], "2 | $bad = \"ok\" @ \"bad\";");
    assert_eq!(lines[4], "  | ------------^");
}
