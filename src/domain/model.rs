use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::utils::error::QuoteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorType {
    SlidingSingleLeaf,
    SlidingDoubleLeaf,
    TelescopicOneWay,
    TelescopicTwoWay,
}

impl DoorType {
    pub const ALL: [DoorType; 4] = [
        DoorType::SlidingSingleLeaf,
        DoorType::SlidingDoubleLeaf,
        DoorType::TelescopicOneWay,
        DoorType::TelescopicTwoWay,
    ];

    pub const fn index(self) -> usize {
        match self {
            DoorType::SlidingSingleLeaf => 0,
            DoorType::SlidingDoubleLeaf => 1,
            DoorType::TelescopicOneWay => 2,
            DoorType::TelescopicTwoWay => 3,
        }
    }

    /// 目錄檔案中使用的鍵名
    pub const fn key(self) -> &'static str {
        match self {
            DoorType::SlidingSingleLeaf => "sliding_single_leaf",
            DoorType::SlidingDoubleLeaf => "sliding_double_leaf",
            DoorType::TelescopicOneWay => "telescopic_one_way",
            DoorType::TelescopicTwoWay => "telescopic_two_way",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DoorType::SlidingSingleLeaf => "Раздвижная одностворчатая",
            DoorType::SlidingDoubleLeaf => "Раздвижная двухстворчатая",
            DoorType::TelescopicOneWay => "Телескопическая односторонняя",
            DoorType::TelescopicTwoWay => "Телескопическая двухсторонняя",
        }
    }
}

impl fmt::Display for DoorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DoorType {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DoorType::ALL
            .into_iter()
            .find(|door| door.key() == s || door.label() == s)
            .ok_or_else(|| QuoteError::InvalidInput {
                field: "door_type".to_string(),
                value: s.to_string(),
                reason: format!(
                    "expected one of: {}",
                    DoorType::ALL.map(DoorType::key).join(", ")
                ),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Manufacturer {
    Geze,
    DoorHan,
}

impl Manufacturer {
    pub const ALL: [Manufacturer; 2] = [Manufacturer::Geze, Manufacturer::DoorHan];

    pub const fn index(self) -> usize {
        match self {
            Manufacturer::Geze => 0,
            Manufacturer::DoorHan => 1,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Manufacturer::Geze => "geze",
            Manufacturer::DoorHan => "door_han",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Manufacturer::Geze => "GEZE",
            Manufacturer::DoorHan => "DoorHan",
        }
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Manufacturer {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Manufacturer::ALL
            .into_iter()
            .find(|m| m.key() == s || m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| QuoteError::InvalidInput {
                field: "manufacturer".to_string(),
                value: s.to_string(),
                reason: "expected one of: geze, door_han".to_string(),
            })
    }
}

/// 安裝地區。`Kazan` 為基準地區，其他地區的運輸費用另計。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Kazan,
    Chelny,
    YoshkarOla,
    Cheboksary,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Kazan,
        Region::Chelny,
        Region::YoshkarOla,
        Region::Cheboksary,
    ];

    pub const BASE: Region = Region::Kazan;

    pub const fn index(self) -> usize {
        match self {
            Region::Kazan => 0,
            Region::Chelny => 1,
            Region::YoshkarOla => 2,
            Region::Cheboksary => 3,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Region::Kazan => "kazan",
            Region::Chelny => "chelny",
            Region::YoshkarOla => "yoshkar_ola",
            Region::Cheboksary => "cheboksary",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Region::Kazan => "Казань",
            Region::Chelny => "Н. Челны",
            Region::YoshkarOla => "Йошкар-Ола",
            Region::Cheboksary => "Чебоксары",
        }
    }

    pub fn is_base(self) -> bool {
        self == Region::BASE
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.key() == s || region.label() == s)
            .ok_or_else(|| QuoteError::InvalidInput {
                field: "region".to_string(),
                value: s.to_string(),
                reason: format!(
                    "expected one of: {}",
                    Region::ALL.map(Region::key).join(", ")
                ),
            })
    }
}

/// 訂購數量，永遠 >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    pub fn new(value: u32) -> Self {
        NonZeroU32::new(value).map(Quantity).unwrap_or(Self::ONE)
    }

    /// 解析使用者輸入；非整數或 <= 0 的輸入一律視為 1
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|value| u32::try_from(value).ok())
            .map(Self::new)
            .unwrap_or(Self::ONE)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 解析尺寸輸入（毫米）；無法解析或負數時為 0
pub fn parse_dimension(input: &str) -> u32 {
    input.trim().parse::<u32>().unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub door_type: DoorType,
    pub manufacturer: Manufacturer,
    pub quantity: Quantity,
    pub width: u32,
    pub height: u32,
    pub has_battery: bool,
    pub has_lock: bool,
    pub has_filling: bool,
    pub has_painting: bool,
    pub region: Region,
    pub has_installation: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            door_type: DoorType::SlidingDoubleLeaf,
            manufacturer: Manufacturer::Geze,
            quantity: Quantity::ONE,
            width: 2000,
            height: 2200,
            has_battery: true,
            has_lock: true,
            has_filling: true,
            has_painting: true,
            region: Region::BASE,
            has_installation: true,
        }
    }
}

/// 單一欄位的設定變更
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    DoorType(DoorType),
    Manufacturer(Manufacturer),
    Quantity(Quantity),
    Width(u32),
    Height(u32),
    Battery(bool),
    Lock(bool),
    Filling(bool),
    Painting(bool),
    Region(Region),
    Installation(bool),
}

impl Configuration {
    pub fn apply(&mut self, change: ConfigChange) {
        match change {
            ConfigChange::DoorType(value) => self.door_type = value,
            ConfigChange::Manufacturer(value) => self.manufacturer = value,
            ConfigChange::Quantity(value) => self.quantity = value,
            ConfigChange::Width(value) => self.width = value,
            ConfigChange::Height(value) => self.height = value,
            ConfigChange::Battery(value) => self.has_battery = value,
            ConfigChange::Lock(value) => self.has_lock = value,
            ConfigChange::Filling(value) => self.has_filling = value,
            ConfigChange::Painting(value) => self.has_painting = value,
            ConfigChange::Region(value) => self.region = value,
            ConfigChange::Installation(value) => self.has_installation = value,
        }
    }

    /// 把整份設定拆成逐欄位的變更
    pub fn changes(&self) -> [ConfigChange; 11] {
        [
            ConfigChange::DoorType(self.door_type),
            ConfigChange::Manufacturer(self.manufacturer),
            ConfigChange::Quantity(self.quantity),
            ConfigChange::Width(self.width),
            ConfigChange::Height(self.height),
            ConfigChange::Battery(self.has_battery),
            ConfigChange::Lock(self.has_lock),
            ConfigChange::Filling(self.has_filling),
            ConfigChange::Painting(self.has_painting),
            ConfigChange::Region(self.region),
            ConfigChange::Installation(self.has_installation),
        ]
    }

    /// 開口面積（平方公尺）
    pub fn opening_area_m2(&self) -> Decimal {
        Decimal::from(self.width) / Decimal::ONE_THOUSAND * Decimal::from(self.height)
            / Decimal::ONE_THOUSAND
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base: Decimal,
    pub battery: Decimal,
    pub lock: Decimal,
    pub filling: Decimal,
    pub painting: Decimal,
    pub markup: Decimal,
    /// 單件價格（不含安裝）
    pub item_price: Decimal,
    /// 單件安裝費
    pub installation_price: Decimal,
    pub total_price: Decimal,
    /// 是否套用大尺寸基價
    pub is_large: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.width.iter().chain(self.height.iter()).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl LeadForm {
    /// 必填欄位（姓名、電話、Email）皆已填寫
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.phone, &self.email]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .filter(|comment| !comment.trim().is_empty())
    }
}

/// 前端送往轉發服務的請求內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRequest {
    pub message: String,
}

/// 轉發服務的回應內容（成功或失敗都只有一段訊息）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReply {
    pub message: String,
}
