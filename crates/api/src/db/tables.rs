//! Compile-time–checked column identifiers for all tables.

use sea_query::Iden;

#[derive(Iden)]
pub enum Beans {
    Table,
    Id,
    Name,
    Roaster,
    Origin,
    RoastLevel,
    CreatedAt,
}

#[derive(Iden)]
pub enum Methods {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
pub enum Grinders {
    Table,
    Id,
    Name,
    MinSetting,
    MaxSetting,
    StepSize,
    SettingType,
    CreatedAt,
}

#[derive(Iden)]
pub enum Brews {
    Table,
    Id,
    BeanId,
    MethodId,
    GrinderId,
    WaterMl,
    DoseG,
    GrindSetting,
    Ratio,
    CreatedAt,
}

#[derive(Iden)]
pub enum BrewFeedback {
    Table,
    Id,
    BrewId,
    OverallRating,
    TooStrong,
    TooWeak,
    IsSour,
    IsBitter,
    CoffeeAmountMl,
    Notes,
    CreatedAt,
}
