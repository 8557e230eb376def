use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Play,
    Pause,
    Previous,
    Next,
    Volume,
    Speaker,
    Music,
    Plus,
    Close,
    Check,
    Grip,
    SignOut,
    Loader,
}

#[component]
pub fn Icon(kind: IconKind, #[props(into, default = "w-5 h-5".to_string())] class: String) -> Element {
    match kind {
        IconKind::Play => rsx! {
            svg { class: "{class}", view_box: "0 0 24 24", fill: "currentColor",
                polygon { points: "6 4 20 12 6 20 6 4" }
            }
        },
        IconKind::Pause => rsx! {
            svg { class: "{class}", view_box: "0 0 24 24", fill: "currentColor",
                rect { x: "6", y: "4", width: "4", height: "16", rx: "1" }
                rect { x: "14", y: "4", width: "4", height: "16", rx: "1" }
            }
        },
        IconKind::Previous => rsx! {
            svg { class: "{class}", view_box: "0 0 24 24", fill: "currentColor",
                polygon { points: "19 20 9 12 19 4 19 20" }
                rect { x: "5", y: "4", width: "2", height: "16" }
            }
        },
        IconKind::Next => rsx! {
            svg { class: "{class}", view_box: "0 0 24 24", fill: "currentColor",
                polygon { points: "5 4 15 12 5 20 5 4" }
                rect { x: "17", y: "4", width: "2", height: "16" }
            }
        },
        IconKind::Volume => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                polygon { points: "11 5 6 9 2 9 2 15 6 15 11 19 11 5" }
                path { d: "M15.54 8.46a5 5 0 0 1 0 7.07" }
            }
        },
        IconKind::Speaker => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                rect { x: "5", y: "2", width: "14", height: "20", rx: "2" }
                circle { cx: "12", cy: "14", r: "4" }
                path { d: "M12 6h.01" }
            }
        },
        IconKind::Music => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M9 18V5l12-2v13" }
                circle { cx: "6", cy: "18", r: "3" }
                circle { cx: "18", cy: "16", r: "3" }
            }
        },
        IconKind::Plus => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M12 5v14M5 12h14" }
            }
        },
        IconKind::Close => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M18 6 6 18M6 6l12 12" }
            }
        },
        IconKind::Check => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "3",
                polyline { points: "20 6 9 17 4 12" }
            }
        },
        IconKind::Grip => rsx! {
            svg { class: "{class}", view_box: "0 0 24 24", fill: "currentColor",
                for (cx , cy) in [(9, 6), (15, 6), (9, 12), (15, 12), (9, 18), (15, 18)] {
                    circle { cx: "{cx}", cy: "{cy}", r: "1.5" }
                }
            }
        },
        IconKind::SignOut => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4" }
                polyline { points: "16 17 21 12 16 7" }
                path { d: "M21 12H9" }
            }
        },
        IconKind::Loader => rsx! {
            svg {
                class: "{class} animate-spin",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle { cx: "12", cy: "12", r: "10", opacity: "0.25" }
                path { d: "M12 2a10 10 0 0 1 10 10", opacity: "0.75" }
            }
        },
    }
}
