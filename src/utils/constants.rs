/// Default source file names
pub const BRAND_MASTER_FILE: &str = "brand_analysis_master.csv";
pub const ATTRACTIVENESS_FILE: &str = "seoul_dong_attractiveness.csv";
pub const STORES_WITH_COORDS_FILE: &str = "seoul_caffee_data_with_coords.csv";
pub const STORES_WITH_BRAND_FILE: &str = "seoul_caffee_data_with_brand.csv";

/// Default output document
pub const DASHBOARD_FILE: &str = "dashboard_data.json";

/// Brand/workforce table columns
pub const COL_DONG_CODE: &str = "행정동코드";
pub const COL_DONG_NAME: &str = "행정동_코드_명";
pub const COL_TOTAL_WORKERS: &str = "total_workers";
pub const COL_FEMALE_WORKERS: &str = "female_workers";
pub const COL_MONTHLY_SALES: &str = "당월_매출_금액";
pub const COL_MALE_SALES: &str = "남성_매출_금액";
pub const COL_FEMALE_SALES: &str = "여성_매출_금액";
pub const COL_AGE_SALES: [&str; 6] = [
    "연령대_10_매출_금액",
    "연령대_20_매출_금액",
    "연령대_30_매출_금액",
    "연령대_40_매출_금액",
    "연령대_50_매출_금액",
    "연령대_60_이상_매출_금액",
];
pub const BRAND_COUNT_PREFIX: &str = "count_";

/// Attractiveness table columns
pub const COL_ATTR_DONG_CODE: &str = "행정동_코드";
pub const COL_TOTAL_SALES: &str = "총_매출";
pub const COL_TOTAL_WORKERS_ATTR: &str = "총_직원수";
pub const COL_CAFE_COUNT: &str = "카페_수";
pub const COL_AVG_PRICE_PER_M2: &str = "m²당_평균_가격";
pub const COL_DEMAND_SCORE: &str = "수요점수";
pub const COL_COMPETITION_SCORE: &str = "경쟁점수";
pub const COL_COST_SCORE: &str = "비용점수";
pub const COL_ATTRACTIVENESS_SCORE: &str = "매력도점수";

/// Store table columns
pub const COL_STORE_NAME: &str = "사업장명";
pub const COL_BRAND: &str = "브랜드";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";

/// Processing defaults
pub const DEFAULT_RECOMMEND_CAP: usize = 200;
pub const DEFAULT_ENCODING: &str = "utf-8";
pub const DEFAULT_MMAP_THRESHOLD: u64 = 16 * 1024 * 1024; // 16MB
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Dashboard view defaults
pub const DEFAULT_DISTRICT_VIEW_LIMIT: usize = 200;
pub const DEFAULT_RECOMMEND_VIEW_LIMIT: usize = 60;

/// Monthly sales per store are reported in units of 10,000 KRW
pub const SALES_UNIT_MANWON: f64 = 1e4;

/// Seoul geographic bounds
pub const SEOUL_MIN_LAT: f64 = 37.41;
pub const SEOUL_MAX_LAT: f64 = 37.72;
pub const SEOUL_MIN_LON: f64 = 126.73;
pub const SEOUL_MAX_LON: f64 = 127.27;

/// Config environment prefix (e.g. CAFE_SITE_RECOMMEND_CAP)
pub const ENV_PREFIX: &str = "CAFE_SITE";
