//! 요청 빈도 순위
//!
//! [`top_requests`]는 레코드 집합에서 요청 문자열별 출현 횟수를 세어
//! 상위 N개를 [`FrequencyTable`]로 반환합니다.
//!
//! # 정렬 규칙
//! 1. 고유 요청을 키 오름차순으로 나열
//! 2. 횟수 내림차순으로 안정 정렬 (동률은 키 오름차순 유지)
//! 3. 앞에서 N개 선택
//!
//! 순위표는 순위 순서를 그대로 보관합니다. 키 순서 보기가 필요하면
//! [`FrequencyTable::by_request`]를 사용합니다.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use logscope_core::types::LogRecord;

/// 순위표 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRequest {
    /// 요청 문자열
    pub request: String,
    /// 출현 횟수
    pub count: u64,
}

/// 순위표 출력 순서
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankOrder {
    /// 횟수 내림차순 (순위 순서)
    #[default]
    Rank,
    /// 요청 문자열 오름차순
    Request,
}

impl RankOrder {
    /// 설정 파일에서 사용하는 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for RankOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rank" => Ok(Self::Rank),
            "request" => Ok(Self::Request),
            other => Err(format!(
                "unknown rank order '{other}', expected 'rank' or 'request'"
            )),
        }
    }
}

/// 상위 N개 요청 순위표
///
/// 항목은 순위 순서(횟수 내림차순, 동률은 요청 오름차순)로 보관됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<RankedRequest>,
}

impl FrequencyTable {
    /// 순위 순서의 항목
    pub fn entries(&self) -> &[RankedRequest] {
        &self.entries
    }

    /// 항목 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 특정 요청의 횟수
    pub fn get(&self, request: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.request == request)
            .map(|entry| entry.count)
    }

    /// 요청 문자열 오름차순 보기
    pub fn by_request(&self) -> BTreeMap<&str, u64> {
        self.entries
            .iter()
            .map(|entry| (entry.request.as_str(), entry.count))
            .collect()
    }

    /// 지정한 순서로 항목을 나열합니다.
    pub fn ordered(&self, order: RankOrder) -> Vec<&RankedRequest> {
        let mut entries: Vec<&RankedRequest> = self.entries.iter().collect();
        if order == RankOrder::Request {
            entries.sort_by(|a, b| a.request.cmp(&b.request));
        }
        entries
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a RankedRequest;
    type IntoIter = std::slice::Iter<'a, RankedRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// 요청 문자열별 횟수를 세어 상위 `n`개를 반환합니다.
///
/// `n <= 0`이면 빈 순위표입니다. 고유 요청 수가 `n`보다 적으면 전부 반환합니다.
pub fn top_requests<'a, I>(records: I, n: i64) -> FrequencyTable
where
    I: IntoIterator<Item = &'a LogRecord>,
{
    let Ok(limit) = usize::try_from(n) else {
        return FrequencyTable::default();
    };
    if limit == 0 {
        return FrequencyTable::default();
    }

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(record.request.as_str()).or_insert(0) += 1;
    }

    // BTreeMap 순회는 키 오름차순이고 sort_by는 안정 정렬이므로 동률은 키 순서를 유지
    let mut ranked: Vec<(&str, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);

    FrequencyTable {
        entries: ranked
            .into_iter()
            .map(|(request, count)| RankedRequest {
                request: request.to_owned(),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn records(requests: &[&str]) -> Vec<LogRecord> {
        requests
            .iter()
            .enumerate()
            .map(|(i, req)| LogRecord::new(i as i64, *req, 500))
            .collect()
    }

    #[test]
    fn ranks_by_descending_count() {
        let input = records(&["GET /a", "GET /b", "GET /b", "GET /c", "GET /c", "GET /c"]);
        let table = top_requests(&input, 10);
        let order: Vec<(&str, u64)> = table
            .entries()
            .iter()
            .map(|e| (e.request.as_str(), e.count))
            .collect();
        assert_eq!(order, vec![("GET /c", 3), ("GET /b", 2), ("GET /a", 1)]);
    }

    #[test]
    fn truncates_to_n() {
        let input = records(&["x", "y", "y", "z", "z", "z"]);
        let table = top_requests(&input, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("z"), Some(3));
        assert_eq!(table.get("y"), Some(2));
        assert_eq!(table.get("x"), None);
    }

    #[test]
    fn ties_broken_by_ascending_request() {
        let input = records(&["GET /zeta", "GET /alpha", "GET /mid", "GET /alpha", "GET /zeta"]);
        let table = top_requests(&input, 2);
        let names: Vec<&str> = table.entries().iter().map(|e| e.request.as_str()).collect();
        assert_eq!(names, vec!["GET /alpha", "GET /zeta"]);
    }

    #[test]
    fn zero_or_negative_n_yields_empty_table() {
        let input = records(&["a", "b"]);
        assert!(top_requests(&input, 0).is_empty());
        assert!(top_requests(&input, -3).is_empty());
    }

    #[test]
    fn empty_requests_are_counted_as_a_key() {
        let input = records(&["", "", "GET /"]);
        let table = top_requests(&input, 5);
        assert_eq!(table.get(""), Some(2));
    }

    #[test]
    fn by_request_view_is_key_ordered() {
        let input = records(&["c", "c", "c", "a", "b", "b"]);
        let table = top_requests(&input, 3);
        let keys: Vec<&str> = table.by_request().into_keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);

        let ordered: Vec<&str> = table
            .ordered(RankOrder::Request)
            .iter()
            .map(|e| e.request.as_str())
            .collect();
        assert_eq!(ordered, vec!["a", "b", "c"]);
    }

    #[test]
    fn serializes_as_list() {
        let input = records(&["GET /a"]);
        let json = serde_json::to_string(&top_requests(&input, 1)).unwrap();
        assert_eq!(json, r#"[{"request":"GET /a","count":1}]"#);
    }

    #[test]
    fn rank_order_from_str() {
        assert_eq!("rank".parse::<RankOrder>(), Ok(RankOrder::Rank));
        assert_eq!("Request".parse::<RankOrder>(), Ok(RankOrder::Request));
        assert!("count".parse::<RankOrder>().is_err());
    }

    proptest! {
        #[test]
        fn large_n_returns_all_distinct_with_true_counts(
            picks in prop::collection::vec(0usize..8, 0..100),
            extra in 0i64..10,
        ) {
            let pool = ["a", "b", "c", "d", "e", "f", "g", "h"];
            let requests: Vec<&str> = picks.iter().map(|&i| pool[i]).collect();
            let input = records(&requests);

            let distinct: BTreeMap<&str, u64> = requests.iter().fold(BTreeMap::new(), |mut acc, r| {
                *acc.entry(*r).or_insert(0) += 1;
                acc
            });

            let table = top_requests(&input, distinct.len() as i64 + extra);
            prop_assert_eq!(table.len(), distinct.len());
            for entry in table.entries() {
                prop_assert_eq!(Some(&entry.count), distinct.get(entry.request.as_str()));
            }
            for pair in table.entries().windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
        }
    }
}
