//! 시장 분위기 판정기.
//!
//! 지수 변동률과 변동성(VIX) 두 숫자만으로 분위기와 행동을 정합니다.
//! 모델이 아닌 결정 테이블이며 규칙은 정확히 세 개입니다.
//!
//! # 규칙 (위에서부터 먼저 맞는 것)
//!
//! 1. 지수 > +0.5% 이고 (VIX 없음 또는 VIX < 18) → **좋음** / 분할 소액 매수
//! 2. 지수 < -0.5% 이고 VIX 있음 이고 VIX > 20 → **나쁨** / 관망(리스크 우선)
//! 3. 그 외 → **애매** / 관망(방향 확인)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{ActionBlock, MoodBlock};

/// 상승 판정 지수 변동률 기준 (%).
pub const RISE_THRESHOLD_PCT: f64 = 0.5;
/// 하락 판정 지수 변동률 기준 (%).
pub const FALL_THRESHOLD_PCT: f64 = -0.5;
/// 변동성 안정 기준 (VIX 미만).
pub const CALM_VOLATILITY: f64 = 18.0;
/// 변동성 불안 기준 (VIX 초과).
pub const STRESSED_VOLATILITY: f64 = 20.0;

/// 시장 분위기.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// 상승 + 변동성 안정
    Good,
    /// 하락 + 변동성 불안
    Bad,
    /// 나머지 전부
    Ambiguous,
}

impl Mood {
    /// 화면 표시용 라벨.
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "좋음",
            Self::Bad => "나쁨",
            Self::Ambiguous => "애매",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Good => "good",
            Self::Bad => "bad",
            Self::Ambiguous => "ambiguous",
        };
        write!(f, "{}", s)
    }
}

/// 권장 행동.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// 분할 소액 매수
    BuySmallStaged,
    /// 관망, 리스크 관리 우선
    StandAsideRiskFirst,
    /// 관망, 방향 확인 후 대응
    StandAsideWait,
}

impl Action {
    /// 화면 표시용 라벨.
    pub fn label(self) -> &'static str {
        match self {
            Self::BuySmallStaged => "분할 소액 매수",
            Self::StandAsideRiskFirst => "관망(리스크 우선)",
            Self::StandAsideWait => "관망(방향 확인)",
        }
    }

    /// 행동 설명.
    pub fn note(self) -> &'static str {
        match self {
            Self::BuySmallStaged => "한 번에 다 사지 말고 2~3회로 나눠서 소액만",
            Self::StandAsideRiskFirst => "신규 매수 보류, 보유 종목 손절 기준부터 점검",
            Self::StandAsideWait => "방향이 확인될 때까지 신규 진입 보류",
        }
    }

    /// 초보자 메모.
    pub fn memo(self) -> &'static str {
        match self {
            Self::BuySmallStaged => "좋은 날일수록 추격 매수 금지. 계획한 금액만.",
            Self::StandAsideRiskFirst => "급할수록 손 떼는 게 이득일 때 많음.",
            Self::StandAsideWait => "애매하면 쉬는 것도 매매다.",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BuySmallStaged => "buy small, staged",
            Self::StandAsideRiskFirst => "stand aside, risk-first",
            Self::StandAsideWait => "stand aside, wait for clarity",
        };
        write!(f, "{}", s)
    }
}

/// 판정 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAction {
    pub mood: Mood,
    pub action: Action,
    pub mood_label: String,
    pub mood_reason: String,
    pub action_label: String,
    pub action_note: String,
    pub action_memo: String,
}

impl MoodAction {
    fn new(mood: Mood, action: Action, reason: String) -> Self {
        Self {
            mood,
            action,
            mood_label: mood.label().to_string(),
            mood_reason: reason,
            action_label: action.label().to_string(),
            action_note: action.note().to_string(),
            action_memo: action.memo().to_string(),
        }
    }

    /// 스냅샷용 분위기 블록.
    pub fn mood_block(&self) -> MoodBlock {
        MoodBlock {
            value: self.mood_label.clone(),
            reason: self.mood_reason.clone(),
        }
    }

    /// 스냅샷용 행동 블록.
    pub fn action_block(&self) -> ActionBlock {
        ActionBlock {
            value: self.action_label.clone(),
            note: self.action_note.clone(),
            beginner_memo: self.action_memo.clone(),
        }
    }
}

/// 지수 변동률(%)과 변동성 수준으로 분위기/행동 판정.
///
/// 두 입력에 대해 전역 함수이며 세 규칙은 상호 배타적이고 전체를 덮습니다.
pub fn classify(index_change_pct: f64, volatility: Option<f64>) -> MoodAction {
    let vol_text = volatility
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string());

    let calm = volatility.map_or(true, |v| v < CALM_VOLATILITY);
    let stressed = volatility.is_some_and(|v| v > STRESSED_VOLATILITY);

    if index_change_pct > RISE_THRESHOLD_PCT && calm {
        MoodAction::new(
            Mood::Good,
            Action::BuySmallStaged,
            format!(
                "S&P500 {:+.2}% 상승, VIX {} 안정 구간",
                index_change_pct, vol_text
            ),
        )
    } else if index_change_pct < FALL_THRESHOLD_PCT && stressed {
        MoodAction::new(
            Mood::Bad,
            Action::StandAsideRiskFirst,
            format!(
                "S&P500 {:+.2}% 하락, VIX {} 불안 구간",
                index_change_pct, vol_text
            ),
        )
    } else {
        MoodAction::new(
            Mood::Ambiguous,
            Action::StandAsideWait,
            format!(
                "S&P500 {:+.2}%, VIX {}: 뚜렷한 방향 없음",
                index_change_pct, vol_text
            ),
        )
    }
}
