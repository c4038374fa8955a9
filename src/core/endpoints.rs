use crate::core::request::WapiClient;
use crate::core::{Coord, QueryParams};
use crate::utils::error::{Result, WapiError};
use serde_json::Value;
use std::fmt::Display;

pub const GEO_SEARCH_FIELDS: &str = "items.geometry.selection,items.links,items.adm_div,\
items.address,items.floors,items.description";

pub const GEO_SEARCH_TYPES: &str = "adm_div.settlement,adm_div.city,adm_div.division,\
adm_div.district,street,building,adm_div.place,poi,attraction";

pub const FIRM_INFO_TYPE: &str = "filial";

pub const FIRM_INFO_FIELDS: &str =
    "items.reviews,items.photos,items.links,items.external_content";

pub const POI_TYPE: &str = "poi";

/// 預設區域：新西伯利亞，可由 `wapi.region_id` 覆寫
pub const DEFAULT_REGION_ID: u64 = 1;

pub const DEFAULT_FIRM_LIST_PAGE: u32 = 1;

/// 端點描述：路徑、必要參數、固定參數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    pub path: &'static str,
    pub required: &'static [&'static str],
    pub fixed: &'static [(&'static str, &'static str)],
}

pub const GEO_SEARCH: EndpointDescriptor = EndpointDescriptor {
    name: "geo_search",
    path: "/geo/search",
    required: &["point", "zoom_level"],
    fixed: &[("fields", GEO_SEARCH_FIELDS), ("type", GEO_SEARCH_TYPES)],
};

pub const FIRM_LIST: EndpointDescriptor = EndpointDescriptor {
    name: "firm_list",
    path: "/catalog/branch/list",
    required: &["building_id", "page"],
    fixed: &[],
};

pub const FIRM_INFO: EndpointDescriptor = EndpointDescriptor {
    name: "firm_info",
    path: "/catalog/branch/get",
    required: &["id"],
    fixed: &[("type", FIRM_INFO_TYPE), ("fields", FIRM_INFO_FIELDS)],
};

pub const POI_LIST: EndpointDescriptor = EndpointDescriptor {
    name: "poi_list",
    path: "/geo/list",
    required: &["region_id"],
    fixed: &[("type", POI_TYPE)],
};

impl EndpointDescriptor {
    /// 合併固定參數、呼叫端參數與 API key
    pub fn build_params(&self, key: &str, args: QueryParams) -> Result<QueryParams> {
        if let Some(missing) = self.required.iter().find(|name| !args.contains_key(**name)) {
            return Err(WapiError::ValidationError {
                message: format!("{}: missing required parameter '{}'", self.name, missing),
            });
        }

        let mut params: QueryParams = self
            .fixed
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        params.extend(args);
        params.insert("key".to_string(), key.to_string());
        Ok(params)
    }
}

impl WapiClient {
    /// 依端點描述組參數並送出請求
    pub async fn call(&self, endpoint: &EndpointDescriptor, args: QueryParams) -> Result<Value> {
        let params = endpoint.build_params(self.api_key(), args)?;
        let url = self.endpoint_url(endpoint.path);
        tracing::debug!("📡 {}: calling {}", endpoint.name, endpoint.path);
        self.request(&url, &params).await
    }

    pub async fn geo_search(&self, coord: Coord, zoom: impl Display) -> Result<Value> {
        let args = QueryParams::from([
            ("point".to_string(), coord.to_point()),
            ("zoom_level".to_string(), zoom.to_string()),
        ]);
        self.call(&GEO_SEARCH, args).await
    }

    pub async fn firm_list(&self, building_id: impl Display, page: Option<u32>) -> Result<Value> {
        let args = QueryParams::from([
            ("building_id".to_string(), building_id.to_string()),
            (
                "page".to_string(),
                page.unwrap_or(DEFAULT_FIRM_LIST_PAGE).to_string(),
            ),
        ]);
        self.call(&FIRM_LIST, args).await
    }

    pub async fn firm_info(&self, firm_id: impl Display) -> Result<Value> {
        let args = QueryParams::from([("id".to_string(), firm_id.to_string())]);
        self.call(&FIRM_INFO, args).await
    }

    pub async fn poi_coordinates(&self) -> Result<Value> {
        let args = QueryParams::from([("region_id".to_string(), self.region_id().to_string())]);
        self.call(&POI_LIST, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_search_params() {
        let args = QueryParams::from([
            ("point".to_string(), Coord::new(10.0, 20.0).to_point()),
            ("zoom_level".to_string(), 15.to_string()),
        ]);
        let params = GEO_SEARCH.build_params("secret", args).unwrap();

        assert_eq!(params["point"], "20,10");
        assert_eq!(params["zoom_level"], "15");
        assert_eq!(params["fields"], GEO_SEARCH_FIELDS);
        assert_eq!(params["type"], GEO_SEARCH_TYPES);
        assert_eq!(params["key"], "secret");
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_missing_required_param() {
        let args = QueryParams::from([("building_id".to_string(), "42".to_string())]);
        let err = FIRM_LIST.build_params("secret", args).unwrap_err();

        assert!(matches!(err, WapiError::ValidationError { .. }));
        assert!(err.to_string().contains("page"));
    }

    #[test]
    fn test_key_cannot_be_overridden_by_caller() {
        let args = QueryParams::from([
            ("id".to_string(), "141265769336625".to_string()),
            ("key".to_string(), "other".to_string()),
        ]);
        let params = FIRM_INFO.build_params("secret", args).unwrap();

        assert_eq!(params["key"], "secret");
        assert_eq!(params["type"], "filial");
    }

    #[test]
    fn test_endpoint_paths() {
        let paths: Vec<&str> = [GEO_SEARCH, FIRM_LIST, FIRM_INFO, POI_LIST]
            .iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(
            paths,
            vec!["/geo/search", "/catalog/branch/list", "/catalog/branch/get", "/geo/list"]
        );
    }

    #[test]
    fn test_fixed_lists_are_comma_separated_without_spaces() {
        for list in [GEO_SEARCH_FIELDS, GEO_SEARCH_TYPES, FIRM_INFO_FIELDS] {
            assert!(!list.contains(' '), "{}", list);
            assert!(list.split(',').all(|item| !item.is_empty()));
        }
        assert_eq!(GEO_SEARCH_TYPES.split(',').count(), 9);
    }
}
