//! Integration tests for the protobuf wire codec.

use meridian_search::{
    Attribute, AttributeType, AttributeValue, CodecError, ConstraintExpr, ConstraintType, DataModel,
    Description, Location, MAX_EXPRESSION_DEPTH, Query, WireCodec,
};

fn weather_model() -> DataModel {
    DataModel::new(
        "weather",
        vec![
            Attribute::new("city", AttributeType::String, true),
            Attribute::new("temperature", AttributeType::Float, true),
            Attribute::new("humidity", AttributeType::Integer, false),
            Attribute::new("raining", AttributeType::Boolean, false),
            Attribute::new("station", AttributeType::Location, true)
                .with_description("Position of the weather station."),
        ],
    )
    .unwrap()
    .with_description("Live weather readings.")
}

fn all_constraint_types() -> Vec<ConstraintExpr> {
    let london = Location::new(51.5074, -0.1278);
    vec![
        ConstraintExpr::constraint("city", ConstraintType::equal("London")),
        ConstraintExpr::constraint("city", ConstraintType::not_equal("Paris")),
        ConstraintExpr::constraint("temperature", ConstraintType::less_than(30.5)),
        ConstraintExpr::constraint("temperature", ConstraintType::less_than_eq(30.0)),
        ConstraintExpr::constraint("humidity", ConstraintType::greater_than(10)),
        ConstraintExpr::constraint("humidity", ConstraintType::greater_than_eq(11)),
        ConstraintExpr::constraint("humidity", ConstraintType::within((10, 90))),
        ConstraintExpr::constraint("temperature", ConstraintType::within((-5.0, 35.0))),
        ConstraintExpr::constraint("city", ConstraintType::within(("A", "M"))),
        ConstraintExpr::constraint("city", ConstraintType::is_in(vec!["London", "Leeds"])),
        ConstraintExpr::constraint("humidity", ConstraintType::not_in(vec![0, 100])),
        ConstraintExpr::constraint("raining", ConstraintType::is_in(vec![false])),
        ConstraintExpr::constraint("temperature", ConstraintType::not_in(Vec::<f64>::new())),
        ConstraintExpr::constraint("station", ConstraintType::is_in(vec![london])),
        ConstraintExpr::constraint("station", ConstraintType::distance(london, 25.0)),
        ConstraintExpr::constraint("raining", ConstraintType::equal(true)),
    ]
}

#[test]
fn test_data_model_round_trip() {
    let model = weather_model();
    let decoded = DataModel::decode(&model.encode()).unwrap();
    assert_eq!(decoded, model);
    assert_eq!(decoded.description(), model.description());
}

#[test]
fn test_description_round_trip() {
    let description = Description::with_data_model(
        [
            ("city", AttributeValue::from("London")),
            ("temperature", 18.5.into()),
            ("raining", true.into()),
            ("station", Location::new(51.4779, -0.0015).into()),
        ],
        weather_model(),
    )
    .unwrap();
    assert_eq!(Description::decode(&description.encode()).unwrap(), description);
}

#[test]
fn test_synthesized_description_round_trip() {
    let description = Description::with_data_model_name(
        [("key", AttributeValue::from("value")), ("count", 3.into())],
        "synthesized",
    )
    .unwrap();
    let decoded = Description::decode(&description.encode()).unwrap();
    assert_eq!(decoded, description);
    assert_eq!(decoded.data_model().name(), "synthesized");
}

#[test]
fn test_every_constraint_type_round_trips() {
    let query = Query::new(all_constraint_types(), Some(weather_model())).unwrap();
    assert_eq!(Query::decode(&query.encode()).unwrap(), query);
}

#[test]
fn test_nested_expressions_round_trip() {
    let leaves = all_constraint_types();
    let nested = ConstraintExpr::and(vec![
        ConstraintExpr::or(leaves[..3].to_vec()).unwrap(),
        ConstraintExpr::not(ConstraintExpr::not(leaves[3].clone())),
        ConstraintExpr::and(vec![
            leaves[4].clone(),
            ConstraintExpr::or(vec![leaves[5].clone(), leaves[6].clone()]).unwrap(),
        ])
        .unwrap(),
    ])
    .unwrap();

    let query = Query::new(vec![nested], None).unwrap();
    assert_eq!(Query::decode(&query.encode()).unwrap(), query);
}

#[test]
fn test_deepest_accepted_query_round_trips() {
    let london = Location::new(51.5074, -0.1278);
    let leaf = || ConstraintExpr::constraint("station", ConstraintType::not_in(vec![london]));

    let nots = (1..MAX_EXPRESSION_DEPTH).fold(leaf(), |expr, _| ConstraintExpr::not(expr));
    let ands = (1..MAX_EXPRESSION_DEPTH)
        .fold(leaf(), |expr, _| ConstraintExpr::and(vec![leaf(), expr]).unwrap());
    assert_eq!(nots.depth(), MAX_EXPRESSION_DEPTH);
    assert_eq!(ands.depth(), MAX_EXPRESSION_DEPTH);

    let query = Query::new(vec![nots, ands], None).unwrap();
    assert_eq!(Query::decode(&query.encode()).unwrap(), query);
}

#[test]
fn test_empty_query_round_trip() {
    let query = Query::new(Vec::new(), None).unwrap();
    let decoded = Query::decode(&query.encode()).unwrap();
    assert_eq!(decoded, query);
    assert!(decoded.is_deprecated_empty());
}

#[test]
fn test_decoded_query_matches_like_source() {
    let query = Query::new(all_constraint_types()[..2].to_vec(), None).unwrap();
    let decoded = Query::decode(&query.encode()).unwrap();
    let description = Description::new([("city", "London")]).unwrap();
    assert_eq!(query.check(&description), decoded.check(&description));
    assert!(decoded.check(&description));
}

#[test]
fn test_truncated_bytes_rejected() {
    let bytes = Query::new(all_constraint_types(), None).unwrap().encode();
    let result = Query::decode(&bytes[..bytes.len() - 1]);
    assert!(matches!(result, Err(CodecError::Decode(_))));
}
