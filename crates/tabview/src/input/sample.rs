//! Built-in demo dataset.

/// Identity under which the sample dataset is loaded.
pub const SAMPLE_IDENTITY: &str = "sample_data.csv";

/// A small company directory.
pub const SAMPLE_CSV: &str = "企業ID,企業名,業種,従業員数,住所
1,サンプル株式会社,IT,100,東京都渋谷区
2,テスト技研,製造,50,大阪府大阪市
3,フューチャー開発,不動産,30,福岡県福岡市";
