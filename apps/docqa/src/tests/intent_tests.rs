use super::*;

#[test]
fn blank_lines_are_ignored() {
    assert_eq!(parse_line("   ", SessionPhase::Collecting), Ok(None));
}

#[test]
fn add_accepts_several_paths() {
    assert_eq!(
        parse_line("add docs/a.pdf scans/b.png", SessionPhase::Collecting),
        Ok(Some(Intent::AddFiles(vec![
            PathBuf::from("docs/a.pdf"),
            PathBuf::from("scans/b.png")
        ])))
    );
    assert!(parse_line("add", SessionPhase::Collecting).is_err());
}

#[test]
fn rm_converts_to_zero_based_index() {
    assert_eq!(
        parse_line("rm 2", SessionPhase::Collecting),
        Ok(Some(Intent::RemoveFile(1)))
    );
    assert!(parse_line("rm 0", SessionPhase::Collecting).is_err());
    assert!(parse_line("rm two", SessionPhase::Collecting).is_err());
}

#[test]
fn ask_keeps_question_text_as_typed() {
    assert_eq!(
        parse_line("ask  what is the total? ", SessionPhase::Ready),
        Ok(Some(Intent::Ask(" what is the total? ".to_string())))
    );
    assert_eq!(
        parse_line("ask", SessionPhase::Ready),
        Ok(Some(Intent::Ask(String::new())))
    );
}

#[test]
fn bare_line_is_a_question_once_ready() {
    assert_eq!(
        parse_line("who signed the lease?\n", SessionPhase::Ready),
        Ok(Some(Intent::Ask("who signed the lease?".to_string())))
    );
    assert!(parse_line("who signed the lease?", SessionPhase::Collecting).is_err());
}

#[test]
fn control_words_parse_in_any_phase() {
    for phase in [SessionPhase::Collecting, SessionPhase::Ready] {
        assert_eq!(parse_line("ls", phase), Ok(Some(Intent::ListFiles)));
        assert_eq!(parse_line("upload", phase), Ok(Some(Intent::Upload)));
        assert_eq!(parse_line("help", phase), Ok(Some(Intent::Help)));
        assert_eq!(parse_line("quit", phase), Ok(Some(Intent::Quit)));
    }
}

#[test]
fn questions_starting_with_command_words_stay_questions_once_ready() {
    assert_eq!(
        parse_line("add up the invoice totals", SessionPhase::Ready),
        Ok(Some(Intent::Ask("add up the invoice totals".to_string())))
    );
    assert_eq!(
        parse_line("help me find the due date", SessionPhase::Ready),
        Ok(Some(Intent::Ask("help me find the due date".to_string())))
    );
    assert_eq!(
        parse_line("rm 1", SessionPhase::Ready),
        Ok(Some(Intent::Ask("rm 1".to_string())))
    );
    assert_eq!(parse_line("help", SessionPhase::Ready), Ok(Some(Intent::Help)));
}

#[test]
fn control_words_take_no_arguments_while_collecting() {
    assert!(parse_line("help me", SessionPhase::Collecting).is_err());
    assert!(parse_line("upload now", SessionPhase::Collecting).is_err());
}
