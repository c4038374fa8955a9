use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// 查詢參數（名稱 -> 值），有序以便記錄與測試
pub type QueryParams = BTreeMap<String, String>;

/// 單一頁面的模板變數
pub type PageVariables = serde_json::Map<String, serde_json::Value>;

/// 頁面識別碼 -> 模板變數
pub type PageDefinitions = BTreeMap<String, PageVariables>;

/// WAPI 回應封包中的 `meta`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    #[serde(deserialize_with = "integral_code")]
    pub code: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `200` 與 `200.0` 同樣接受，非整數值視為格式錯誤
fn integral_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| serde::de::Error::custom(format!("code {} is not an integer", number)))
}

/// 經緯度座標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

impl Coord {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `point` 參數格式：經度在前，緯度在後
    pub fn to_point(self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}
