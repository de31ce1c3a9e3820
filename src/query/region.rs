//! Genomic region strings such as `chr4:10000-10050`

use crate::error::AppError;
use crate::query::compound::BoolQuery;
use crate::query::primitives::{Query, RangeQuery};
use std::fmt;
use std::str::FromStr;

/// A chromosome interval; `end` is inclusive and optional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub seqid: String,
    pub start: u64,
    pub end: Option<u64>,
}

impl Region {
    /// Bool query matching markers on `seqid` whose `start` lies in the interval
    pub fn to_query(&self) -> BoolQuery {
        let mut range = RangeQuery::new("start").gte(self.start);
        if let Some(end) = self.end {
            range = range.lte(end);
        }
        BoolQuery::new()
            .must(Query::term("seqid", self.seqid.clone()))
            .must(range)
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidArgument(format!("Invalid region: {}", s));

        let (chrom, span) = s.trim().split_once(':').ok_or_else(invalid)?;
        let seqid = chrom
            .strip_prefix("chr")
            .or_else(|| chrom.strip_prefix("CHR"))
            .unwrap_or(chrom);
        if seqid.is_empty() {
            return Err(invalid());
        }

        let parse = |n: &str| n.replace(',', "").parse::<u64>().map_err(|_| invalid());
        let (start, end) = match span.split_once('-') {
            Some((start, end)) => (parse(start)?, Some(parse(end)?)),
            None => (parse(span)?, None),
        };
        if matches!(end, Some(end) if end < start) {
            return Err(invalid());
        }

        Ok(Self {
            seqid: seqid.to_string(),
            start,
            end,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "chr{}:{}-{}", self.seqid, self.start, end),
            None => write!(f, "chr{}:{}", self.seqid, self.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_region() {
        let region: Region = "chr4:10000-10050".parse().unwrap();
        assert_eq!(region.seqid, "4");
        assert_eq!(region.start, 10000);
        assert_eq!(region.end, Some(10050));
        assert_eq!(region.to_string(), "chr4:10000-10050");
    }

    #[test]
    fn test_parse_position_only() {
        let region: Region = "X:1,000".parse().unwrap();
        assert_eq!(region.seqid, "X");
        assert_eq!(region.start, 1000);
        assert_eq!(region.end, None);
    }

    #[test]
    fn test_invalid_regions() {
        assert!("chr4".parse::<Region>().is_err());
        assert!("chr4:abc".parse::<Region>().is_err());
        assert!("chr4:200-100".parse::<Region>().is_err());
        assert!(":1-2".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_query() {
        let region: Region = "chr4:10000-10050".parse().unwrap();
        assert_eq!(
            region.to_query().to_json(),
            json!({"bool": {"must": [
                {"term": {"seqid": "4"}},
                {"range": {"start": {"gte": 10000, "lte": 10050}}}
            ]}})
        );
    }
}
