use jscloak::identifier::{BrandedNamer, IdentifierNamer, SUFFIX_LEN};

#[test]
fn stem_is_the_latin_residue_of_the_seed_phrase() {
    assert_eq!(BrandedNamer::stem(), "TERRIDEVTERRIDEV");
}

#[test]
fn identifiers_are_stem_plus_two_latin_letters() {
    let namer = BrandedNamer::new();
    for _ in 0..50 {
        let name = namer.next_identifier();
        assert!(name.starts_with(BrandedNamer::stem()));
        let suffix = &name[BrandedNamer::stem().len()..];
        assert_eq!(suffix.chars().count(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphabetic()));
    }
}

#[test]
fn only_the_suffix_varies_across_calls() {
    let namer = BrandedNamer::new();
    let names: Vec<String> = (0..100).map(|_| namer.next_identifier()).collect();
    assert!(names
        .iter()
        .all(|name| name.len() == BrandedNamer::stem().len() + SUFFIX_LEN));
    // 100 draws from 52^2 suffixes should not all coincide
    let first = &names[0];
    assert!(names.iter().any(|name| name != first));
}
