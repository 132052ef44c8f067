use serde_json::json;

use service_rules::{AnswerValue, Question, QuestionType, ServiceDefinition, ServiceForm, ValueOption};

fn pickup_fixture() -> ServiceDefinition {
    serde_json::from_value(json!({
        "code": "BULK",
        "name": "Bulk item pickup",
        "attributes": [
            {
                "code": "ITEM-KIND",
                "type": "SINGLEVALUELIST",
                "required": true,
                "values": [
                    { "key": "furniture", "name": "Furniture" },
                    { "key": "appliance", "name": "Appliance" }
                ]
            },
            {
                "code": "ITEMS",
                "type": "MULTIVALUELIST",
                "required": true,
                "values": [
                    { "key": "sofa", "name": "Sofa" },
                    { "key": "table", "name": "Table" }
                ],
                "conditionalValues": [
                    {
                        "dependentConditions": {
                            "clause": "AND",
                            "conditions": [
                                { "attribute": "ITEM-KIND", "op": "eq", "value": { "type": "STRING", "string": "appliance" } }
                            ]
                        },
                        "values": [
                            { "key": "fridge", "name": "Refrigerator" },
                            { "key": "washer", "name": "Washing machine" }
                        ]
                    },
                    {
                        "dependentConditions": {
                            "clause": "OR",
                            "conditions": [
                                { "attribute": "COUNT", "op": "gte", "value": { "type": "NUMBER", "number": 5 } }
                            ]
                        },
                        "values": [ { "key": "truck", "name": "Extra truck" } ]
                    }
                ]
            },
            {
                "code": "COUNT",
                "type": "NUMBER",
                "required": true,
                "validations": [
                    {
                        "dependentConditions": {
                            "clause": "AND",
                            "conditions": [
                                { "attribute": "COUNT", "op": "gte", "value": { "type": "NUMBER", "number": 1 } },
                                { "attribute": "COUNT", "op": "lte", "value": { "type": "NUMBER", "number": 10 } }
                            ]
                        },
                        "message": "Pick between 1 and 10 items."
                    },
                    {
                        "dependentConditions": {
                            "clause": "AND",
                            "conditions": [
                                { "attribute": "COUNT", "op": "lt", "value": { "type": "NUMBER", "number": 8 } }
                            ]
                        },
                        "message": "Large pickups may take an extra week.",
                        "reportOnly": true
                    }
                ]
            }
        ]
    }))
    .expect("fixture should deserialize")
}

fn keys(options: Option<Vec<ValueOption>>) -> Option<Vec<String>> {
    options.map(|options| options.into_iter().map(|option| option.key).collect())
}

#[test]
fn initial_values_follow_question_type() {
    let form = ServiceForm::from_definition(&pickup_fixture()).unwrap();
    assert_eq!(form.question("ITEM-KIND").unwrap().value(), None);
    assert_eq!(
        form.question("ITEMS").unwrap().value(),
        Some(&AnswerValue::List(Vec::new()))
    );
    assert_eq!(
        form.question("COUNT").unwrap().value(),
        Some(&AnswerValue::Text(String::new()))
    );
    assert_eq!(
        Question::initial_value(QuestionType::BooleanCheckbox),
        Some(AnswerValue::Text(String::new()))
    );
}

#[test]
fn value_options_append_conditional_blocks_in_order() {
    let mut form = ServiceForm::from_definition(&pickup_fixture()).unwrap();
    assert_eq!(keys(form.question("COUNT").unwrap().value_options()), None);
    assert_eq!(
        keys(form.question("ITEMS").unwrap().value_options()),
        Some(vec!["sofa".into(), "table".into()])
    );

    form.set_value("ITEM-KIND", Some("appliance".into())).unwrap();
    form.set_value("COUNT", Some("6".into())).unwrap();
    assert_eq!(
        keys(form.question("ITEMS").unwrap().value_options()),
        Some(vec![
            "sofa".into(),
            "table".into(),
            "fridge".into(),
            "washer".into(),
            "truck".into()
        ])
    );
}

#[test]
fn safe_value_drops_options_no_longer_offered() {
    let mut form = ServiceForm::from_definition(&pickup_fixture()).unwrap();
    form.set_value("ITEM-KIND", Some("appliance".into())).unwrap();
    form.set_value("ITEMS", Some(vec!["fridge", "sofa", "bogus"].into()))
        .unwrap();
    assert_eq!(
        form.question("ITEMS").unwrap().safe_value(),
        Some(vec!["fridge", "sofa"].into())
    );

    form.set_value("ITEM-KIND", Some("furniture".into())).unwrap();
    assert_eq!(
        form.question("ITEMS").unwrap().safe_value(),
        Some(vec!["sofa"].into())
    );

    form.set_value("ITEMS", Some(vec!["fridge"].into())).unwrap();
    let items = form.question("ITEMS").unwrap();
    assert_eq!(items.safe_value(), Some(AnswerValue::List(Vec::new())));
    assert!(!items.has_safe_value());
    assert!(!items.requirements_met());
}

#[test]
fn scalar_outside_options_has_no_safe_value() {
    let mut form = ServiceForm::from_definition(&pickup_fixture()).unwrap();
    form.set_value("ITEM-KIND", Some("boat".into())).unwrap();
    assert_eq!(form.question("ITEM-KIND").unwrap().safe_value(), None);
    form.set_value("ITEM-KIND", Some("furniture".into())).unwrap();
    assert_eq!(
        form.question("ITEM-KIND").unwrap().safe_value(),
        Some("furniture".into())
    );
}

#[test]
fn validations_wait_for_an_answer() {
    let form = ServiceForm::from_definition(&pickup_fixture()).unwrap();
    let count = form.question("COUNT").unwrap();
    assert!(count.validation_error_messages().is_empty());
    assert!(count.validation_info_messages().is_empty());
    assert!(!count.requirements_met());
}

#[test]
fn self_referencing_validation_blocks_out_of_range_values() {
    let mut form = ServiceForm::from_definition(&pickup_fixture()).unwrap();
    form.set_value("COUNT", Some("12".into())).unwrap();
    let count = form.question("COUNT").unwrap();
    assert_eq!(
        count.validation_error_messages(),
        vec!["Pick between 1 and 10 items.".to_string()]
    );
    assert_eq!(
        count.validation_info_messages(),
        vec!["Large pickups may take an extra week.".to_string()]
    );
    assert!(!count.requirements_met());

    form.set_value("COUNT", Some("abc".into())).unwrap();
    assert!(!form.question("COUNT").unwrap().requirements_met());
}

#[test]
fn report_only_validation_does_not_block() {
    let mut form = ServiceForm::from_definition(&pickup_fixture()).unwrap();
    form.set_value("COUNT", Some("9".into())).unwrap();
    let count = form.question("COUNT").unwrap();
    assert!(count.validation_error_messages().is_empty());
    assert_eq!(count.validation_info_messages().len(), 1);
    assert!(count.requirements_met());

    form.set_value("COUNT", Some("3".into())).unwrap();
    let count = form.question("COUNT").unwrap();
    assert!(count.validation_info_messages().is_empty());
    assert!(count.requirements_met());
}

#[test]
fn whole_form_gate_over_list_questions() {
    let mut form = ServiceForm::from_definition(&pickup_fixture()).unwrap();
    assert!(!form.questions_ok());

    form.set_value("ITEM-KIND", Some("appliance".into())).unwrap();
    form.set_value("ITEMS", Some(vec!["washer"].into())).unwrap();
    form.set_value("COUNT", Some("2".into())).unwrap();
    assert!(form.questions_ok());

    form.set_value("ITEM-KIND", Some("furniture".into())).unwrap();
    assert!(!form.questions_ok());

    let report = form.report();
    assert_eq!(report.blocking, vec!["ITEMS".to_string()]);
    assert_eq!(report.missing_required, vec!["ITEMS".to_string()]);
    assert_eq!(report.status.as_str(), "need_input");
}
