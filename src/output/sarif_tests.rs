use super::*;
use crate::output::tests::sample_report;

fn parse(report: &Report) -> serde_json::Value {
    let output = SarifFormatter::new().format(report).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn sarif_has_schema_and_version() {
    let json = parse(&sample_report());
    assert_eq!(json["$schema"], SARIF_SCHEMA);
    assert_eq!(json["version"], "2.1.0");
    assert_eq!(json["runs"][0]["tool"]["driver"]["name"], "osprey-lint");
}

#[test]
fn every_rule_has_a_descriptor() {
    let json = parse(&Report::default());
    let rules = json["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap();
    assert_eq!(rules.len(), RuleId::ALL.len() + 1);
    assert_eq!(rules[0]["id"], "max-line-length");
    assert_eq!(rules[0]["defaultConfiguration"]["level"], "warning");
    assert_eq!(rules[rules.len() - 1]["id"], "lex-error");
}

#[test]
fn one_result_per_diagnostic_with_region() {
    let json = parse(&sample_report());
    let results = json["runs"][0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    let first = &results[0];
    assert_eq!(first["ruleId"], "type-name-casing");
    assert_eq!(first["level"], "error");
    let location = &first["locations"][0]["physicalLocation"];
    assert_eq!(location["artifactLocation"]["uri"], "src/widget.osp");
    assert_eq!(location["region"]["startLine"], 1);
    assert_eq!(location["region"]["startColumn"], 7);
}

#[test]
fn rule_index_points_at_descriptor() {
    let json = parse(&sample_report());
    let rules = json["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap();
    for result in json["runs"][0]["results"].as_array().unwrap() {
        let index = result["ruleIndex"].as_u64().unwrap() as usize;
        assert_eq!(rules[index]["id"], result["ruleId"]);
    }
}

#[test]
fn complete_runs_are_successful() {
    let json = parse(&sample_report());
    let invocation = &json["runs"][0]["invocations"][0];
    assert_eq!(invocation["executionSuccessful"], true);
    assert!(invocation.get("toolExecutionNotifications").is_none());
}

#[test]
fn unreadable_files_mark_the_invocation_unsuccessful() {
    let mut report = sample_report();
    report.skipped.push(std::path::PathBuf::from("src/binary.osp"));
    let sarif = parse(&report);

    let invocation = &sarif["runs"][0]["invocations"][0];
    assert_eq!(invocation["executionSuccessful"], false);
    let notification = &invocation["toolExecutionNotifications"][0];
    assert_eq!(notification["level"], "error");
    assert!(
        notification["message"]["text"]
            .as_str()
            .unwrap()
            .starts_with("src/binary.osp:")
    );
}
