//! Fixed team and host-city lists the model was trained on.

pub const TEAMS: [&str; 8] = [
    "Sunrisers Hyderabad",
    "Mumbai Indians",
    "Royal Challengers Bangalore",
    "Kolkata Knight Riders",
    "Kings XI Punjab",
    "Chennai Super Kings",
    "Rajasthan Royals",
    "Delhi Capitals",
];

pub const CITIES: [&str; 29] = [
    "Hyderabad",
    "Bangalore",
    "Mumbai",
    "Indore",
    "Kolkata",
    "Delhi",
    "Chandigarh",
    "Jaipur",
    "Chennai",
    "Cape Town",
    "Port Elizabeth",
    "Durban",
    "Centurion",
    "East London",
    "Johannesburg",
    "Kimberley",
    "Bloemfontein",
    "Ahmedabad",
    "Cuttack",
    "Nagpur",
    "Dharamsala",
    "Visakhapatnam",
    "Pune",
    "Raipur",
    "Ranchi",
    "Abu Dhabi",
    "Sharjah",
    "Mohali",
    "Bengaluru",
];

/// Team names in dropdown order.
pub fn sorted_teams() -> Vec<&'static str> {
    let mut teams = TEAMS.to_vec();
    teams.sort_unstable();
    teams
}

/// City names in dropdown order.
pub fn sorted_cities() -> Vec<&'static str> {
    let mut cities = CITIES.to_vec();
    cities.sort_unstable();
    cities
}

pub fn is_known_team(name: &str) -> bool {
    TEAMS.contains(&name)
}

pub fn is_known_city(name: &str) -> bool {
    CITIES.contains(&name)
}
