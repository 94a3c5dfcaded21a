use orgmap::domain::OrganismCode;
use orgmap::go::{GoResolver, GoTaxonomyMapper};
use orgmap::kegg::{KeggCodeMapper, KeggResolver};
use orgmap::table::DelimitedTable;

const KEGG_TAXONOMY: &str = concat!(
    "# KEGG organisms\n",
    "code\tspecies\n",
    "hpy\tHelicobacter pylori 26695\n",
    "eco\tEscherichia coli K-12 MG1655\n"
);

const PROTEOME2TAXID: &str = concat!(
    "64091\tHalobacterium salinarium\n",
    "85962\tHelicobacter pylori 26695\n"
);

#[test]
fn kegg_resolves_existing_code() {
    let table = DelimitedTable::parse(KEGG_TAXONOMY, '\t', true, Some("#"));
    let mapper = KeggCodeMapper::new(&table);
    let code: OrganismCode = "hpy".parse().unwrap();
    assert_eq!(
        mapper.resolve(&code).as_deref(),
        Some("Helicobacter pylori 26695")
    );
}

#[test]
fn kegg_unknown_code_is_none() {
    let table = DelimitedTable::parse(KEGG_TAXONOMY, '\t', true, Some("#"));
    let mapper = KeggCodeMapper::new(&table);
    let code: OrganismCode = "nope".parse().unwrap();
    assert_eq!(mapper.resolve(&code), None);
}

#[test]
fn kegg_header_row_is_not_an_entry() {
    let table = DelimitedTable::parse(KEGG_TAXONOMY, '\t', true, Some("#"));
    let mapper = KeggCodeMapper::new(&table);
    assert_eq!(mapper.len(), 2);
    let code: OrganismCode = "code".parse().unwrap();
    assert_eq!(mapper.resolve(&code), None);
}

#[test]
fn go_resolves_existing_species() {
    let table = DelimitedTable::parse(PROTEOME2TAXID, '\t', false, None);
    let mapper = GoTaxonomyMapper::new(&table);
    let id = mapper.resolve("Halobacterium salinarium").unwrap();
    assert_eq!(id.as_str(), "64091");
}

#[test]
fn go_unknown_species_is_none() {
    let table = DelimitedTable::parse(PROTEOME2TAXID, '\t', false, None);
    let mapper = GoTaxonomyMapper::new(&table);
    assert_eq!(mapper.resolve("does not exist"), None);
}
