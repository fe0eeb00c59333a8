mod common;

use anyhow::Result;
use common::{
    person_row, Account, Booking, Person, PersonText, Priority, Profile, Scores, Shade, Slot,
    Status, Swatch, Task,
};
use small_mapper::{
    copy_matching, create_mapped, CoercionPolicy, Decimal, FailureReason, JsonRecord, Mapper,
    MapperError, MappingConfig, MappingOutcome, TextRecord,
};

#[test]
fn test_text_age_is_parsed_into_integer() -> Result<()> {
    let source = PersonText {
        name: "Bob".to_string(),
        age: "42".to_string(),
        status: "A".to_string(),
    };

    let mapped = create_mapped::<Person, _>(&source)?;

    assert_eq!(
        mapped.value,
        Person {
            name: "Bob".to_string(),
            age: 42,
            status: Status::Active,
        }
    );
    assert!(mapped.report.is_complete());
    assert_eq!(mapped.report.copied, vec!["name", "age", "status"]);
    Ok(())
}

#[test]
fn test_identical_records_copy_exactly() -> Result<()> {
    let source = Scores {
        name: "Ann".to_string(),
        age: -3,
        score: 0.1 + 0.2,
        active: true,
        balance: Decimal::new(123_456_789, 4),
    };

    let mapped = create_mapped::<Scores, _>(&source)?;

    assert_eq!(mapped.value, source);
    assert_eq!(mapped.report.outcome(), MappingOutcome::Complete);
    Ok(())
}

#[test]
fn test_null_source_yields_zero_values() -> Result<()> {
    let mut destination = Scores {
        name: "stale".to_string(),
        age: 9,
        score: 9.5,
        active: true,
        balance: Decimal::ONE,
    };

    let report = copy_matching(&Profile::default(), &mut destination)?;

    assert!(report.is_complete());
    assert_eq!(destination, Scores::default());
    Ok(())
}

#[test]
fn test_empty_cell_into_integer_is_zero() -> Result<()> {
    let mut row = TextRecord::new("row").with("Name", "Ann");
    row.insert("Age", None);

    let mapped = create_mapped::<Person, _>(&row)?;

    assert_eq!(mapped.value.age, 0);
    assert!(mapped.report.is_complete());
    Ok(())
}

#[test]
fn test_null_into_enum_takes_default_member() -> Result<()> {
    let mut from_record = Person {
        status: Status::Active,
        ..Person::default()
    };
    let report = copy_matching(&Profile::default(), &mut from_record)?;
    assert_eq!(from_record.status, Status::Unknown);
    assert!(report.copied.contains(&"status"));
    assert!(report.is_complete());

    let mut row = TextRecord::new("row");
    row.insert("Status", None);
    let mut from_text = Person {
        status: Status::Active,
        ..Person::default()
    };
    let report = copy_matching(&row, &mut from_text)?;
    assert_eq!(from_text.status, Status::Unknown);
    assert_eq!(report.copied, vec!["status"]);
    Ok(())
}

#[test]
fn test_enum_codes_are_matched_without_trimming() -> Result<()> {
    let padded = create_mapped::<Booking, _>(&TextRecord::new("row").with("Slot", " A "))?;
    assert_eq!(padded.value.slot, Slot::Padded);

    let tight = create_mapped::<Booking, _>(&TextRecord::new("row").with("Slot", "A"))?;
    assert_eq!(tight.value.slot, Slot::Tight);

    let stray = create_mapped::<Person, _>(&TextRecord::new("row").with("Status", " A "))?;
    assert_eq!(stray.value.status, Status::Unknown);
    Ok(())
}

#[test]
fn test_unparseable_text_keeps_prior_value() -> Result<()> {
    let mut destination = Person {
        name: "Old".to_string(),
        age: 7,
        status: Status::Inactive,
    };

    let report = copy_matching(&person_row("Ann", "abc"), &mut destination)?;

    assert_eq!(destination.name, "Ann");
    assert_eq!(destination.age, 7);
    assert_eq!(destination.status, Status::Inactive);
    assert_eq!(report.outcome(), MappingOutcome::Partial { failed: 1 });
    assert_eq!(report.failed_properties(), vec!["age"]);
    assert_eq!(report.skipped, vec!["status"]);
    assert_eq!(
        report.failures[0].failure.reason,
        FailureReason::Unparseable {
            text: "abc".to_string()
        }
    );
    Ok(())
}

#[test]
fn test_property_names_match_ignoring_case() -> Result<()> {
    let row = TextRecord::new("row")
        .with("NAME", "Eve")
        .with("age", "5")
        .with("sTaTuS", "I");

    let mapped = create_mapped::<Person, _>(&row)?;

    assert_eq!(mapped.value.name, "Eve");
    assert_eq!(mapped.value.age, 5);
    assert_eq!(mapped.value.status, Status::Inactive);
    Ok(())
}

#[test]
fn test_surrounding_whitespace_depends_on_policy() -> Result<()> {
    let row = person_row("Ann", " 42 ");

    let trimmed = create_mapped::<Person, _>(&row)?;
    assert_eq!(trimmed.value.age, 42);

    let exact = Mapper::with_policy(CoercionPolicy { trim_text: false }, false);
    let untrimmed = exact.create_mapped::<Person, _>(&row)?;
    assert_eq!(untrimmed.value.age, 0);
    assert_eq!(untrimmed.report.failed_properties(), vec!["age"]);
    Ok(())
}

#[test]
fn test_text_codes_resolve_to_enum_members() -> Result<()> {
    let known = create_mapped::<Person, _>(&person_row("Ann", "1").with("Status", "I"))?;
    assert_eq!(known.value.status, Status::Inactive);

    let unknown = create_mapped::<Person, _>(&person_row("Ann", "1").with("Status", "retired"))?;
    assert_eq!(unknown.value.status, Status::Unknown);
    assert!(unknown.report.is_complete());
    Ok(())
}

#[test]
fn test_enum_and_numbers_render_as_text() -> Result<()> {
    let source = Person {
        name: "Bob".to_string(),
        age: 42,
        status: Status::Active,
    };

    let mapped = create_mapped::<PersonText, _>(&source)?;

    assert_eq!(mapped.value.age, "42");
    assert_eq!(mapped.value.status, "A");

    let unknown = Person {
        status: Status::Unknown,
        ..source
    };
    assert_eq!(create_mapped::<PersonText, _>(&unknown)?.value.status, "Unknown");
    Ok(())
}

#[test]
fn test_nullable_destinations_receive_null_or_value() -> Result<()> {
    let mut row = TextRecord::new("row")
        .with("Score", "2.5")
        .with("Active", "TRUE")
        .with("Balance", "1e3")
        .with("Status", "A");
    row.insert("Age", None);
    row.insert("Name", None);

    let mapped = create_mapped::<Profile, _>(&row)?;

    assert_eq!(
        mapped.value,
        Profile {
            name: None,
            age: None,
            score: Some(2.5),
            active: Some(true),
            balance: Some(Decimal::new(1000, 0)),
            status: Some(Status::Active),
        }
    );
    Ok(())
}

#[test]
fn test_cross_enum_copy_fails_loud() -> Result<()> {
    let source = Person {
        name: "Ann".to_string(),
        age: 30,
        status: Status::Active,
    };
    let mut destination = Swatch::default();

    let report = copy_matching(&source, &mut destination)?;

    assert_eq!(destination.name, "Ann");
    assert_eq!(destination.status, Shade::Dark);
    assert_eq!(report.failed_properties(), vec!["status"]);
    assert_eq!(report.failures[0].failure.reason, FailureReason::CrossEnum);
    assert_eq!(report.skipped, Vec::<&str>::new());
    Ok(())
}

#[test]
fn test_missing_constructor_is_construction_failure() {
    let err = create_mapped::<Account, _>(&person_row("Ann", "1")).unwrap_err();
    assert!(matches!(
        err,
        MapperError::ConstructionFailure {
            type_name: "Account"
        }
    ));
}

#[test]
fn test_copy_into_existing_record_without_constructor() -> Result<()> {
    let mut account = Account {
        id: 1,
        name: String::new(),
    };
    let row = TextRecord::new("row").with("Id", "900").with("Name", "Ops");

    copy_matching(&row, &mut account)?;

    assert_eq!(account.id, 900);
    assert_eq!(account.name, "Ops");
    Ok(())
}

#[test]
fn test_strict_mapper_rejects_partial_copy() {
    let mapper = Mapper::new(&MappingConfig {
        strict: Some(true),
        trim_text: None,
    });
    let mut destination = Person::default();

    let err = mapper
        .copy(&person_row("Ann", "abc"), &mut destination)
        .unwrap_err();

    match err {
        MapperError::PartialCopy {
            type_name,
            failures,
        } => {
            assert_eq!(type_name, "Person");
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].property, "age");
        }
        other => panic!("expected PartialCopy, got {other:?}"),
    }
    // Writes made before the failure stay in place.
    assert_eq!(destination.name, "Ann");
}

#[test]
fn test_enum_without_default_aborts_mapping() -> Result<()> {
    let known = create_mapped::<Task, _>(&TextRecord::new("row").with("Priority", "H"))?;
    assert_eq!(known.value.priority, Priority::High);

    let unknown = TextRecord::new("row").with("Title", "x").with("Priority", "Z");
    assert!(matches!(
        create_mapped::<Task, _>(&unknown),
        Err(MapperError::NoDefaultConfigured {
            type_name: "Priority"
        })
    ));

    let mut missing = TextRecord::new("row");
    missing.insert("Priority", None);
    assert!(matches!(
        create_mapped::<Task, _>(&missing),
        Err(MapperError::NoDefaultConfigured { .. })
    ));
    Ok(())
}

#[test]
fn test_json_record_as_source() -> Result<()> {
    let source = JsonRecord::from_json_str(
        r#"{"name": "Ann", "age": 31, "score": 2.5, "active": true, "balance": "10.25", "tags": ["x"]}"#,
    )?;

    let mapped = create_mapped::<Scores, _>(&source)?;

    assert_eq!(
        mapped.value,
        Scores {
            name: "Ann".to_string(),
            age: 31,
            score: 2.5,
            active: true,
            balance: Decimal::new(1025, 2),
        }
    );
    assert!(mapped.report.is_complete());
    Ok(())
}

#[test]
fn test_report_serializes_for_logging() -> Result<()> {
    let mut destination = Person::default();
    let report = copy_matching(&person_row("Ann", "abc"), &mut destination)?;

    let json = serde_json::to_value(&report)?;

    assert_eq!(json["destination"], "Person");
    assert_eq!(json["copied"], serde_json::json!(["name"]));
    assert_eq!(json["failures"][0]["property"], "age");
    assert!(json["failures"][0]["failure"]
        .as_str()
        .is_some_and(|text| text.contains("abc")));
    Ok(())
}

#[test]
fn test_concurrent_mapping_shares_metadata() {
    let rows: Vec<TextRecord> = (0..16)
        .map(|i| person_row(&format!("user{i}"), &i.to_string()).with("Status", "A"))
        .collect();

    let results: Vec<Person> = std::thread::scope(|scope| {
        let handles: Vec<_> = rows
            .iter()
            .map(|row| scope.spawn(move || create_mapped::<Person, _>(row).map(|m| m.value)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });

    for (i, person) in results.iter().enumerate() {
        assert_eq!(person.name, format!("user{i}"));
        assert_eq!(person.age, i as i32);
        assert_eq!(person.status, Status::Active);
    }
}
