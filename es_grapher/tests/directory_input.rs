use std::fs;

use es_grapher::{GrapherConfig, compile_files, load_input, write_output};

#[test]
fn directory_input_concatenates_missions_and_events() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("events")).unwrap();
    fs::write(
        dir.path().join("missions.txt"),
        "mission Start\n\ton complete\n\t\tevent \"Arrival\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("events/arrival.txt"), "event \"Arrival\"\n\tdate 1 1 3014\n").unwrap();

    let files = load_input(Some(dir.path())).unwrap();
    assert_eq!(files.len(), 2);
    let out = compile_files(&files, &GrapherConfig::default()).unwrap();
    assert!(out.contains("\t\"event: Arrival\" [label=\"Arrival\",fillcolor=\"#88FF88\"];\n"));
    assert!(out.contains("\t\"Start\" -> \"event: Arrival\";\n"));
    assert!(!out.contains("external event"));

    let target = dir.path().join("out.dot");
    write_output(Some(&target), &out).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), out);
}

#[test]
fn unreadable_file_in_directory_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.txt"), "mission A\n").unwrap();
    fs::write(dir.path().join("bad.bin"), [0xff_u8, 0xfe, 0x00]).unwrap();
    let err = load_input(Some(dir.path())).unwrap_err();
    assert!(format!("{err:#}").contains("bad.bin"));
}
