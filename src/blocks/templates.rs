//! Starter content for every block type, used when a block is added to a page.

use super::{
    BlockKind, BlockStyle, BlockType, FaqItem, FeatureItem, GalleryItem, Icon, LinkStyle,
    PageBlock, SmartLink, StatItem, TextAlign,
};

/// Build a fully-formed block of `block_type` carrying the given id.
/// Total over `BlockType`: every type has a template.
pub fn instantiate(block_type: BlockType, id: &str) -> PageBlock {
    let mut block = PageBlock {
        id: id.to_string(),
        kind: BlockKind::empty(block_type),
        title: String::new(),
        subtitle: String::new(),
        content: String::new(),
        actions: Vec::new(),
        image: None,
        style: BlockStyle::default(),
    };

    match block_type {
        BlockType::Hero => {
            block.title = "مهمة جديدة".into();
            block.subtitle = "أفق البحار الرقمية".into();
            block.content = "ابدأ بكتابة قصتك الأسطورية هنا وصف كيف ستغزو العالم.".into();
            block.actions = vec![
                SmartLink::new("انطلق الآن", "#", LinkStyle::RoyalGradient).with_icon(Icon::Rocket),
                SmartLink::new("Share", "#share", LinkStyle::Solid).with_icon(Icon::Share),
            ];
            block.style = BlockStyle {
                overlay_opacity: Some(0.5),
                ..BlockStyle::with_padding("24", TextAlign::Center)
            };
        }
        BlockType::TextImage => {
            block.title = "الميزة الكبرى".into();
            block.subtitle = "لماذا نحن؟".into();
            block.content = "وصف تفصيلي للميزات والخدمات التي تقدمها إمبراطوريتك.".into();
            block.image =
                Some("https://images.unsplash.com/photo-1518837695005-2083093ee35b?q=80&w=1000".into());
            block.style = BlockStyle::with_padding("20", TextAlign::Left);
        }
        BlockType::FeaturesGrid => {
            block.title = "قدرات الأسطول".into();
            block.subtitle = "نظام متكامل".into();
            block.kind = BlockKind::FeaturesGrid(vec![
                feature("سرعة البرق", "استجابة فورية في أقل من 10 ملي ثانية.", Icon::Zap),
                feature("درع نانو", "حماية كاملة ضد الاختراق والتشفير.", Icon::Shield),
                feature("اتصال عالمي", "وصول من أي مكان في المحيط الرقمي.", Icon::Ship),
            ]);
            block.style = BlockStyle {
                grid_cols: Some(3),
                ..BlockStyle::with_padding("20", TextAlign::Center)
            };
        }
        BlockType::StatsCounter => {
            block.kind = BlockKind::StatsCounter(vec![
                stat("قبطان نشط", "1.2K"),
                stat("رحلة ناجحة", "15K"),
                stat("جزيرة مكتشفة", "840"),
            ]);
            block.style = BlockStyle::with_padding("10", TextAlign::Center);
        }
        BlockType::Gallery => {
            block.title = "معرض الإنجازات".into();
            block.subtitle = "لقطات من الميدان".into();
            block.kind = BlockKind::Gallery(vec![
                gallery(
                    "الجزيرة الذهبية",
                    "استكشاف 2024",
                    "https://images.unsplash.com/photo-1519046904884-53103b34b206?q=80&w=600",
                ),
                gallery(
                    "سفينة القيادة",
                    "التصميم الأول",
                    "https://images.unsplash.com/photo-1543349689-9a4d426bee87?q=80&w=600",
                ),
                gallery(
                    "المدينة العائمة",
                    "التوسع الشمالي",
                    "https://images.unsplash.com/photo-1506929197327-fb87b3ee5f91?q=80&w=600",
                ),
            ]);
            block.style = BlockStyle {
                grid_cols: Some(3),
                ..BlockStyle::with_padding("20", TextAlign::Center)
            };
        }
        BlockType::Faq => {
            block.title = "أسئلة البحارة".into();
            block.subtitle = "كل ما تريد معرفته".into();
            block.kind = BlockKind::Faq(vec![
                FaqItem {
                    question: "كيف يمكنني الانضمام؟".into(),
                    answer: "ببساطة قم بإنشاء هويتك الملكية عبر صفحة التسجيل.".into(),
                },
                FaqItem {
                    question: "هل النظام آمن؟".into(),
                    answer: "نستخدم أقوى بروتوكولات التشفير AES-512 لحماية بياناتك.".into(),
                },
            ]);
        }
        BlockType::CtaBar => {
            block.title = "هل أنت جاهز للقيادة؟".into();
            block.content = "انضم لآلاف القادة الذين يبنون إمبراطورياتهم اليوم.".into();
            block.actions = vec![
                SmartLink::new("ابدأ مجاناً", "/register", LinkStyle::RoyalGradient).with_icon(Icon::Zap),
            ];
            block.style = BlockStyle::with_padding("12", TextAlign::Center);
        }
        BlockType::Divider => {
            block.style = BlockStyle::with_padding("10", TextAlign::Center);
        }
        BlockType::VideoBlock => {
            block.title = "العرض الرسمي".into();
            block.content = "شاهد قوة أسطول الهامور في هذا المقطع الحصري.".into();
            block.image = Some("https://www.youtube.com/embed/dQw4w9WgXcQ".into());
        }
        BlockType::PricingTable => {
            block.title = "باقات الدعم".into();
            block.subtitle = "اختر مستواك".into();
        }
        BlockType::SocialLinks => {
            block.style = BlockStyle::with_padding("10", TextAlign::Center);
        }
        BlockType::TeamSection => {}
        BlockType::NewsTicker => {
            block.content =
                "أخبار عاجلة: اكتشاف قارة جديدة في المحيط الهادئ... سفن القيادة تستعد للإقلاع..."
                    .into();
            block.style = BlockStyle::with_padding("5", TextAlign::Left);
        }
    }

    block
}

fn feature(title: &str, content: &str, icon: Icon) -> FeatureItem {
    FeatureItem {
        title: title.into(),
        content: content.into(),
        icon: Some(icon),
    }
}

fn stat(label: &str, value: &str) -> StatItem {
    StatItem {
        label: label.into(),
        value: value.into(),
    }
}

fn gallery(title: &str, subtitle: &str, image: &str) -> GalleryItem {
    GalleryItem {
        title: title.into(),
        image: image.into(),
        subtitle: Some(subtitle.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_instantiates_with_its_own_type_and_id() {
        for t in BlockType::ALL {
            let block = instantiate(t, "block_1");
            assert_eq!(block.block_type(), t);
            assert_eq!(block.id, "block_1");
            assert!(!block.style.padding_y.is_empty());
        }
    }

    #[test]
    fn faq_template_has_question_answer_pairs() {
        let block = instantiate(BlockType::Faq, "f");
        match block.kind {
            BlockKind::Faq(items) => {
                assert!(!items.is_empty());
                assert!(items.iter().all(|i| !i.question.is_empty() && !i.answer.is_empty()));
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn divider_template_is_bare() {
        let block = instantiate(BlockType::Divider, "d");
        assert!(block.title.is_empty());
        assert!(block.content.is_empty());
        assert!(block.actions.is_empty());
        assert_eq!(block.kind.item_count(), 0);
        assert_eq!(block.style.padding_y, "10");
    }

    #[test]
    fn unspecified_style_falls_back_to_schema_defaults() {
        let faq = instantiate(BlockType::Faq, "f");
        assert_eq!(faq.style.padding_y, "20");
        assert_eq!(faq.style.text_align, TextAlign::Center);
        let team = instantiate(BlockType::TeamSection, "t");
        assert_eq!(team.style, BlockStyle::default());
    }

    #[test]
    fn grid_templates_start_with_three_columns() {
        for t in [BlockType::Gallery, BlockType::FeaturesGrid] {
            let block = instantiate(t, "g");
            assert_eq!(block.style.grid_cols, Some(3));
            assert_eq!(block.kind.item_count(), 3);
        }
    }
}
