//! Tests for voos-model types.

use voos_model::{
    Constraint, Field, FilterKey, FilterSpec, FlightLogRecord, FlightRecord, Month, Periodo,
};

#[test]
fn record_serializes_with_canonical_column_names() {
    let record = FlightLogRecord::from_fields([
        (Field::Data, "15/03/2022"),
        (Field::DiarioDeBordo, "1234"),
        (Field::Orgao, "SEF"),
        (Field::HorasVoadas, "1.5"),
    ]);
    let json = serde_json::to_value(&record).expect("serialize record");
    let object = json.as_object().expect("json object");
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    for field in Field::ALL {
        assert!(keys.contains(&field.as_str()), "missing {field}");
    }
    assert_eq!(object["Ano"], "2022");
    assert_eq!(object["Diario_de_Bordo"], "1234");
    assert_eq!(object["Destino"], "");
}

#[test]
fn flight_record_serializes_total_column() {
    let flight = FlightRecord {
        data: "01/01/2021".to_string(),
        total_passageiros: 3,
        ..FlightRecord::default()
    };
    let json = serde_json::to_value(&flight).expect("serialize flight");
    assert_eq!(json[FlightRecord::TOTAL_COLUMN], 3);
    assert!(json.get("Passageiros").is_none());
}

#[test]
fn filter_spec_from_flat_mapping() {
    let (spec, unknown) = FilterSpec::from_pairs([
        ("ano", "2021"),
        ("mes", "all"),
        ("periodo", "30d"),
        ("situacao", "REALIZADO"),
        ("pagina", "2"),
    ]);
    assert_eq!(spec.ano, Constraint::Only("2021".to_string()));
    assert_eq!(spec.mes, Constraint::All);
    assert_eq!(spec.periodo, Constraint::Only(Periodo::Last30Days));
    assert_eq!(spec.situacao, Constraint::Only("REALIZADO".to_string()));
    assert_eq!(spec.origem, Constraint::All);
    assert_eq!(unknown, vec!["pagina".to_string()]);
    assert_eq!(
        spec.active_keys(),
        vec![FilterKey::Ano, FilterKey::Periodo, FilterKey::Situacao]
    );
}

#[test]
fn out_of_domain_values_are_kept() {
    let (spec, _) = FilterSpec::from_pairs([("mes", "13"), ("periodo", "ontem")]);
    assert_eq!(spec.mes, Constraint::OutOfDomain("13".to_string()));
    assert_eq!(spec.periodo, Constraint::OutOfDomain("ontem".to_string()));
    assert!(!spec.is_unconstrained());
}

#[test]
fn empty_mapping_is_unconstrained() {
    let (spec, unknown) = FilterSpec::from_pairs(Vec::<(String, String)>::new());
    assert!(spec.is_unconstrained());
    assert!(unknown.is_empty());
    assert_eq!(spec, FilterSpec::all());
}

#[test]
fn builder_matches_flat_mapping() {
    let built = FilterSpec::all()
        .with_ano("2021")
        .with_mes(Month::new(3).unwrap())
        .with_orgao("SEF");
    let (parsed, _) = FilterSpec::from_pairs([("ano", "2021"), ("mes", "3"), ("orgao", "SEF")]);
    assert_eq!(built, parsed);
}
