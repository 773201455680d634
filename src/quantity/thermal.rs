quantity!(Celsius, suffix: "°C", precision: 1);
