use clap::Parser;
use menace::cli::commands::inspect::{InspectArgs, execute};

fn parse_args<I, T>(args: I) -> InspectArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    InspectArgs::parse_from(args)
}

#[test]
fn inspect_after_short_training_succeeds() {
    let args = parse_args([
        "menace-inspect",
        "--board",
        "X...O....",
        "--training-games",
        "20",
        "--seed",
        "1",
    ]);

    execute(args).expect("inspecting a live board should succeed");
}

#[test]
fn inspect_without_training_reads_a_fresh_box() {
    let args = parse_args([
        "menace-inspect",
        "--training-games",
        "0",
        "--opponent",
        "defensive",
    ]);

    execute(args).expect("the empty board is always inspectable");
}

#[test]
fn overlong_board_is_rejected() {
    let args = parse_args([
        "menace-inspect",
        "--board",
        "X........OOO",
        "--training-games",
        "0",
    ]);

    let err = execute(args).unwrap_err();
    assert!(
        format!("{err:#}").contains("invalid board 'X........OOO'"),
        "{err:#}"
    );
}

#[test]
fn full_board_has_no_matchbox() {
    let args = parse_args([
        "menace-inspect",
        "--board",
        "XOXXOOOXX",
        "--training-games",
        "0",
    ]);

    let err = execute(args).unwrap_err();
    assert!(format!("{err:#}").contains("no matchbox"), "{err:#}");
}
