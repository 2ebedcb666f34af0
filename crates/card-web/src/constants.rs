// Element ids and class names shared with the page markup

pub const ID_STARS: &str = "bgStars";
pub const ID_LIGHTS: &str = "lights";
pub const ID_BANNER: &str = "banner";
pub const ID_BALLOONS: &str = "balloons";
pub const ID_CAKE: &str = "cake";
pub const ID_CAKE_3D: &str = "cake3d";
pub const ID_MESSAGE: &str = "message";
pub const ID_BGM: &str = "bgm";
pub const ID_ACTION: &str = "btnAction";
pub const ID_MUSIC: &str = "btnMusic";
pub const ID_REPLAY: &str = "btnReplay";
pub const ID_CONFETTI: &str = "confetti";
pub const ID_CONFIG: &str = "card-config";

pub const CLASS_SHOW: &str = "show";
pub const CLASS_FLY: &str = "fly";
pub const CLASS_LIT: &str = "lit";
pub const CLASS_BLOW: &str = "blow";
pub const CLASS_ON: &str = "on";
pub const CLASS_BALLOON: &str = "balloon";

// Canvas inside #cake3d the renderer draws into
pub const CAKE_CANVAS_CLASS: &str = "cake3d-canvas";
pub const CAKE_CLEAR_COLOR: wgpu::Color = wgpu::Color::TRANSPARENT;
