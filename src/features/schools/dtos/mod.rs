mod school_dto;

pub use school_dto::{
    CreateSchoolDto, ListSchoolsQuery, ListSchoolsResponseDto, ReferencePoint, SchoolDistanceDto,
    SchoolResponseDto,
};
