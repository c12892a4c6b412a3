use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

#[test]
fn validate_command_ok() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("vf.csv");
    fs::write(
        &input,
        "SUBJECT NUMBER,Laterality,Visit Number,VF1,VF2,VF3\n\
         1,OD,1,30,30,30\n\
         1,OD,2,26,26,26\n\
         1,OS,1,30,30,30\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("kira-vfprogress").unwrap();
    cmd.current_dir(tmp.path());
    cmd.arg("validate").arg("--input").arg(&input);
    let out = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(out).unwrap();
    assert!(stdout.contains("series: 2"), "{}", stdout);
    assert!(stdout.contains("test points: 3"), "{}", stdout);

    let written: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
    assert_eq!(written.len(), 1);
}

#[test]
fn validate_command_reports_type_error() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("vf.csv");
    fs::write(
        &input,
        "SUBJECT NUMBER,Laterality,Visit Number,VF1\n1,OD,1,thirty\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("kira-vfprogress").unwrap();
    cmd.arg("validate").arg("--input").arg(&input);
    let out = cmd.assert().failure().get_output().stderr.clone();
    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("VF1"), "{}", stderr);
}
