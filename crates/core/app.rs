use clap::Args;
use eyre::eyre;
use hathi::{IdKind, IdentifierSet, Mode, Query, Variant, Volumes};
use log::info;

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// OCLC number
    #[clap(long)]
    oclc: Option<String>,

    /// Library of Congress Control Number
    #[clap(long)]
    lccn: Option<String>,

    /// ISSN
    #[clap(long)]
    issn: Option<String>,

    /// ISBN
    #[clap(long)]
    isbn: Option<String>,

    /// HathiTrust volume id
    #[clap(long)]
    htid: Option<String>,

    /// 9-digit catalog record number
    #[clap(long = "recordnumber")]
    record_number: Option<String>,

    /// Identifiers of one item as `kind:value;kind:value`, may be repeated for several items
    ///
    /// When used the single identifier options above are ignored.
    #[clap(long, multiple_occurrences = true)]
    ids: Vec<IdentifierSet>,

    /// Use the full API, records include MARC-XML
    #[clap(long)]
    full: bool,

    /// Search each identifier on its own instead of treating them as one item
    #[clap(long)]
    many: bool,

    /// Canonicalize identifiers (digits only ISBN/ISSN/OCLC, normalized LCCN) before searching
    #[clap(long)]
    normalize: bool,
}

impl QueryArgs {
    pub fn into_query(self, base_url: Option<String>) -> eyre::Result<Query> {
        let QueryArgs {
            oclc,
            lccn,
            issn,
            isbn,
            htid,
            record_number,
            ids,
            full,
            many,
            normalize,
        } = self;

        // volume id first, as in the API's own multi-identifier examples
        let scalars = [
            (IdKind::Htid, htid),
            (IdKind::Oclc, oclc),
            (IdKind::Lccn, lccn),
            (IdKind::Issn, issn),
            (IdKind::Isbn, isbn),
            (IdKind::RecordNumber, record_number),
        ];

        if ids.is_empty() && scalars.iter().all(|(_, value)| value.is_none()) {
            return Err(eyre!(
                "At least one identifier is required, use --oclc, --lccn, --issn, --isbn, --htid, --recordnumber or --ids"
            ));
        }

        let mut query = scalars
            .into_iter()
            .filter_map(|(kind, value)| value.map(|value| (kind, value)))
            .fold(Query::new(), |query, (kind, value)| query.identifier(kind, value))
            .ids(ids)
            .variant(if full { Variant::Full } else { Variant::Brief })
            .mode(if many { Mode::Many } else { Mode::Single })
            .normalize(normalize);

        if let Some(base_url) = base_url {
            info!("Using catalog at '{base_url}'");
            query = query.base_url(base_url);
        }

        Ok(query)
    }
}

pub fn item_lines(volumes: &Volumes) -> String {
    volumes
        .items
        .iter()
        .map(|item| {
            let title = volumes
                .record_of(item)
                .and_then(|record| record.titles.first())
                .map_or("No title", String::as_str);
            format!(
                "{}\t{}\t{}\t{}",
                item.htid,
                item.rights_code,
                item.enumcron.as_deref().unwrap_or_default(),
                title
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{item_lines, QueryArgs};
    use hathi::Volumes;

    fn args() -> QueryArgs {
        QueryArgs {
            oclc: None,
            lccn: None,
            issn: None,
            isbn: None,
            htid: None,
            record_number: None,
            ids: Vec::new(),
            full: false,
            many: false,
            normalize: false,
        }
    }

    #[test]
    fn volume_id_option_comes_first() {
        let query = QueryArgs {
            oclc: Some("424023".to_owned()),
            htid: Some("BJD1".to_owned()),
            ..args()
        }
        .into_query(None)
        .unwrap();

        assert_eq!(
            "http://catalog.hathitrust.org/api/volumes/brief/json/id:BJD1;oclc:424023",
            query.url().unwrap()
        );
    }

    #[test]
    fn ids_option_builds_composite_query() {
        let query = QueryArgs {
            ids: vec![
                "htid:BJD1;oclc:424023".parse().unwrap(),
                "lccn:70628581".parse().unwrap(),
            ],
            full: true,
            ..args()
        }
        .into_query(Some("http://localhost:8080".to_owned()))
        .unwrap();

        assert_eq!(
            "http://localhost:8080/api/volumes/full/json/id:BJD1;oclc:424023|lccn:70628581",
            query.url().unwrap()
        );
    }

    #[test]
    fn no_identifiers_is_an_error() {
        assert!(args().into_query(None).is_err());
    }

    #[test]
    fn item_lines_include_record_title() {
        let volumes = Volumes::from_value(serde_json::json!({
            "records": {
                "000578050": {
                    "recordURL": "https://catalog.hathitrust.org/Record/000578050",
                    "titles": ["The Wind in the Willows"]
                }
            },
            "items": [
                {
                    "orig": "University of California",
                    "fromRecord": "000578050",
                    "htid": "uc1.b3209022",
                    "itemURL": "https://hdl.handle.net/2027/uc1.b3209022",
                    "rightsCode": "ic",
                    "lastUpdate": "20140206",
                    "enumcron": "v.2",
                    "usRightsString": "Limited (search-only)"
                },
                {
                    "orig": "University of Michigan",
                    "fromRecord": "999999999",
                    "htid": "mdp.39015005337046",
                    "itemURL": "https://hdl.handle.net/2027/mdp.39015005337046",
                    "rightsCode": "pd",
                    "lastUpdate": "20130803",
                    "enumcron": false,
                    "usRightsString": "Full view"
                }
            ]
        }))
        .unwrap();

        assert_eq!(
            "uc1.b3209022\tic\tv.2\tThe Wind in the Willows\nmdp.39015005337046\tpd\t\tNo title",
            item_lines(&volumes)
        );
    }
}
