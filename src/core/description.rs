//! Human-readable labels for gift statuses and push channels.
//!
//! Kept apart from the lifecycle so display text never feeds back into transition logic.

use crate::entities::{GiftStatus, PushType};

#[must_use]
pub const fn status_description(status: GiftStatus) -> &'static str {
    match status {
        GiftStatus::Init => "선물 주문 생성",
        GiftStatus::InPayment => "결제 중",
        GiftStatus::OrderComplete => "주문 완료",
        GiftStatus::PushComplete => "선물 링크 발송 완료",
        GiftStatus::Accept => "선물 수락",
        GiftStatus::DeliveryPrepare => "상품준비",
        GiftStatus::InDelivery => "배송중",
        GiftStatus::DeliveryComplete => "배송완료",
        GiftStatus::Expiration => "선물 수락 만료",
    }
}

#[must_use]
pub const fn push_type_description(push_type: PushType) -> &'static str {
    match push_type {
        PushType::Kakao => "카카오톡",
        PushType::Lms => "문자",
    }
}
