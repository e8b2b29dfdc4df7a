use chrono::{NaiveDate, NaiveDateTime};
use insta::assert_snapshot;
use obs2prompt_core::{AggregateOptions, LinkAggregator};
use std::fs;
use tempfile::tempdir;

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

#[test]
fn golden_two_file_aggregate() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("Index.md"), "# Index\n\n[[Child]]\n").unwrap();
    fs::write(tmp.path().join("Child.md"), "Child body.\n").unwrap();

    let aggregator = LinkAggregator::new(AggregateOptions::new(tmp.path(), 1)).unwrap();
    let outcome = aggregator.process("Index");
    let rendered = outcome.aggregate().unwrap().render(generated_at());

    assert_snapshot!(rendered, @r"
    # Content from Index

    - Generated on: 2024-03-01 12:00:00
    - Depth: 1
    - Files collected: 2

    ## File Structure

    ├── Child.md
    └── Index.md


    ## Content

    ### Index.md
    Path: `Index.md`

    # Index

    [[Child]]


    ---

    ### Child.md
    Path: `Child.md`

    Child body.


    ---

    ## File Statistics

    - Total Files: 2
    - Total Lines: 4
    - Total Size: 31.0 B
    - Total Tokens: 5
    ");
}

#[test]
fn golden_heading_slice_in_tree() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("Start.md"), "[[Guide#Usage]]").unwrap();
    fs::write(tmp.path().join("Guide.md"), "## Setup\nx\n## Usage\nrun it\n").unwrap();

    let aggregator = LinkAggregator::new(AggregateOptions::new(tmp.path(), 1)).unwrap();
    let outcome = aggregator.process("Start.md");
    let tree = outcome.aggregate().unwrap().file_tree().join("\n");

    assert_snapshot!(tree, @r"
    ├── Guide.md (heading: Usage)
    └── Start.md
    ");
}
